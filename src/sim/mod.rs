//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per tick, per-tick motion units
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Aabb, is_stomp};
pub use level::generate_level;
pub use state::{Coin, Enemy, GamePhase, GameState, Platform, PlatformKind, Player};
pub use tick::{TickInput, tick};
