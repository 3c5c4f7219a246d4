//! Ledge Runner - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (physics, collisions, level generation, game state)
//! - `render`: Canvas-2D presentation (wasm only, pure function of state)

pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod render;

/// Game configuration constants
///
/// Motion constants are per-tick; the simulation advances once per rendered
/// frame at the host's nominal 60 Hz cadence.
pub mod consts {
    /// Level dimensions (canvas pixels)
    pub const LEVEL_WIDTH: f32 = 800.0;
    pub const LEVEL_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 300.0;
    /// Horizontal speed while a move key is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Upward impulse applied on jump
    pub const JUMP_IMPULSE: f32 = 15.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.8;
    /// Horizontal velocity damping when no move key is held
    pub const FRICTION: f32 = 0.8;

    /// Ground platform (always present, spans the full level width)
    pub const GROUND_Y: f32 = 360.0;
    pub const GROUND_HEIGHT: f32 = 40.0;
    /// Elevated platform height
    pub const PLATFORM_HEIGHT: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Enemy patrol speed magnitude range
    pub const ENEMY_MIN_SPEED: f32 = 1.5;
    pub const ENEMY_MAX_SPEED: f32 = 4.0;
    /// Vertical trim on the enemy hitbox (contact near the feet is forgiven)
    pub const ENEMY_HITBOX_TRIM: f32 = 10.0;
    /// Extra margin below the player's feet that still counts as a stomp
    pub const STOMP_MARGIN: f32 = 8.0;
    /// Upward bounce applied to the player after a stomp
    pub const STOMP_BOUNCE: f32 = -10.0;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 15.0;

    /// Scoring
    pub const STOMP_SCORE: u32 = 100;
    pub const COIN_SCORE: u32 = 50;

    /// Progression
    pub const MAX_LEVEL: u32 = 5;
    pub const STARTING_LIVES: u32 = 3;
    /// Freeze after losing a life (1.5 s at 60 fps)
    pub const LIFE_LOST_PAUSE_TICKS: u32 = 90;
    /// Damage immunity after respawning (2 s at 60 fps)
    pub const INVINCIBILITY_TICKS: u32 = 120;
}
