//! Game state and entity types
//!
//! The whole simulation lives in one `GameState` aggregate that the frame
//! driver owns; nothing here is global. Timers are tick countdowns stored in
//! the state so the simulation can be single-stepped in tests.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::level;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen while the life-lost message shows
    LifeLostPause,
    /// Out of lives (terminal until restart)
    GameOver,
    /// Cleared the final level (terminal until restart)
    Victory,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Reset to the level start (life loss, level advance, restart)
    pub fn reset(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Bottom edge y (the feet)
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A ground-patrolling enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal patrol velocity; sign flips on touching a level edge
    pub vx: f32,
}

impl Enemy {
    /// Contact hitbox: full width, but vertically trimmed at the feet
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            self.pos,
            Vec2::new(self.size.x, self.size.y - ENEMY_HITBOX_TRIM),
        )
    }
}

/// Platform role, used for coin anchoring and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// The full-width floor
    Ground,
    /// A randomized elevated platform
    Ledge,
}

/// A static platform rectangle
#[derive(Debug, Clone)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Top surface y
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// A collectible coin
///
/// Collected coins stay in the collection with the flag flipped, so per-level
/// counts remain stable for the renderer and the tests.
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Cosmetic shine offset, renderer only
    pub glint_phase: f32,
}

impl Coin {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for logging
    pub seed: u64,
    /// RNG stream for level generation
    pub rng: Pcg32,
    /// Current level (1..=MAX_LEVEL)
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    /// Coins collected across the whole run
    pub coins_collected: u32,
    pub phase: GamePhase,
    /// Ticks left in the life-lost freeze
    pub pause_ticks: u32,
    /// Ticks of damage immunity left after a respawn
    pub invincible_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
}

impl GameState {
    /// Create a new game at level 1
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            lives: STARTING_LIVES,
            score: 0,
            coins_collected: 0,
            phase: GamePhase::Playing,
            pause_ticks: 0,
            invincible_ticks: 0,
            time_ticks: 0,
            player: Player::spawn(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
        };
        state.reset_for_level();
        state
    }

    /// Wholesale-replace all level entities and put the player at the start
    ///
    /// Replacement is synchronous, so the renderer can never observe a
    /// half-built level.
    pub fn reset_for_level(&mut self) {
        let layout = level::generate_level(self.level, &mut self.rng);
        self.platforms = layout.platforms;
        self.enemies = layout.enemies;
        self.coins = layout.coins;
        self.player.reset();
    }

    pub fn invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Player reached the right edge of the level
    ///
    /// Advances to the next level, or to `Victory` from the final one.
    pub fn advance_level(&mut self) {
        if self.level >= MAX_LEVEL {
            self.phase = GamePhase::Victory;
            log::info!(
                "Victory! score={} coins={}",
                self.score,
                self.coins_collected
            );
        } else {
            self.level += 1;
            self.reset_for_level();
            log::info!("Advanced to level {}", self.level);
        }
    }

    /// Process a life-loss event (enemy hit or falling off the level)
    ///
    /// Ignored while already paused for a previous loss or while invincible,
    /// so at most one loss is in flight at a time.
    pub fn lose_life(&mut self) {
        if self.phase != GamePhase::Playing || self.invincible() {
            return;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score={} coins={}",
                self.score,
                self.coins_collected
            );
        } else {
            self.phase = GamePhase::LifeLostPause;
            self.pause_ticks = LIFE_LOST_PAUSE_TICKS;
            log::info!("Life lost, {} remaining", self.lives);
        }
    }

    /// Resume play after the life-lost freeze expires
    pub fn respawn(&mut self) {
        self.player.reset();
        self.invincible_ticks = INVINCIBILITY_TICKS;
        self.phase = GamePhase::Playing;
    }

    /// Full reset back to level 1, valid from any phase
    pub fn restart(&mut self) {
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.coins_collected = 0;
        self.phase = GamePhase::Playing;
        self.pause_ticks = 0;
        self.invincible_ticks = 0;
        self.time_ticks = 0;
        self.reset_for_level();
        log::info!("Restarted");
    }
}
