//! Randomized level generation
//!
//! Every level is built the same way: the full-width ground, a handful of
//! elevated ledges, ground-patrolling enemies, and coins perched on the
//! ledges. Counts and ranges are the invariant, not exact placements.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::state::{Coin, Enemy, Platform, PlatformKind};
use crate::consts::*;

/// Elevated platform count range
const LEDGE_COUNT: std::ops::RangeInclusive<usize> = 2..=4;
/// Enemy count range
const ENEMY_COUNT: std::ops::RangeInclusive<usize> = 2..=5;
/// Coin count range
const COIN_COUNT: std::ops::RangeInclusive<usize> = 2..=5;
/// Elevated platform width range
const LEDGE_WIDTH: std::ops::RangeInclusive<f32> = 80.0..=160.0;
/// Elevated platform x range
const LEDGE_X: std::ops::RangeInclusive<f32> = 100.0..=700.0;
/// Elevated platform y range
const LEDGE_Y: std::ops::RangeInclusive<f32> = 120.0..=320.0;

/// Freshly generated entity collections for one level
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
}

/// Generate a new level arrangement
///
/// The level index only feeds the log line; generation is uniform across
/// levels and the driver decides when the run ends.
pub fn generate_level(level: u32, rng: &mut Pcg32) -> LevelLayout {
    let mut platforms = vec![Platform {
        pos: Vec2::new(0.0, GROUND_Y),
        size: Vec2::new(LEVEL_WIDTH, GROUND_HEIGHT),
        kind: PlatformKind::Ground,
    }];

    let ledge_count = rng.random_range(LEDGE_COUNT);
    for _ in 0..ledge_count {
        platforms.push(Platform {
            pos: Vec2::new(rng.random_range(LEDGE_X), rng.random_range(LEDGE_Y)),
            size: Vec2::new(rng.random_range(LEDGE_WIDTH), PLATFORM_HEIGHT),
            kind: PlatformKind::Ledge,
        });
    }

    let enemy_count = rng.random_range(ENEMY_COUNT);
    let mut enemies = Vec::with_capacity(enemy_count);
    for _ in 0..enemy_count {
        let speed = rng.random_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED);
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        enemies.push(Enemy {
            pos: Vec2::new(
                rng.random_range(0.0..=LEVEL_WIDTH - ENEMY_SIZE),
                GROUND_Y - ENEMY_SIZE,
            ),
            size: Vec2::new(ENEMY_SIZE, ENEMY_SIZE),
            vx: speed * direction,
        });
    }

    // Coins sit on elevated platforms only; the generator always produces at
    // least two ledges, so the anchor pool is never empty.
    let ledges: Vec<(Vec2, Vec2)> = platforms
        .iter()
        .filter(|p| p.kind == PlatformKind::Ledge)
        .map(|p| (p.pos, p.size))
        .collect();

    let coin_count = rng.random_range(COIN_COUNT);
    let mut coins = Vec::with_capacity(coin_count);
    for _ in 0..coin_count {
        let (ledge_pos, ledge_size) = ledges[rng.random_range(0..ledges.len())];
        let offset = rng.random_range(0.0..=ledge_size.x - COIN_SIZE);
        coins.push(Coin {
            pos: Vec2::new(ledge_pos.x + offset, ledge_pos.y - COIN_SIZE),
            size: Vec2::new(COIN_SIZE, COIN_SIZE),
            collected: false,
            glint_phase: rng.random_range(0.0..TAU),
        });
    }

    log::info!(
        "Level {}: {} platforms, {} enemies, {} coins",
        level,
        platforms.len(),
        enemies.len(),
        coins.len()
    );

    LevelLayout {
        platforms,
        enemies,
        coins,
    }
}
