//! Per-frame simulation step
//!
//! `tick` advances the whole game by one frame: player physics, platform
//! landing, enemy patrol and contact, coin collection, and the progression
//! transitions that fall out of them.

use super::collision::{is_landing, is_stomp};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
///
/// Movement and jump reflect currently-held keys; restart is a one-shot the
/// driver clears after the tick that consumed it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub restart: bool,
}

/// What the player-motion pass concluded this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerStep {
    Moved,
    /// Touched the right level boundary; the rest of the tick is skipped
    ReachedExit,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Restart works from any phase and cancels pending timers
    if input.restart {
        state.restart();
        return;
    }

    match state.phase {
        GamePhase::GameOver | GamePhase::Victory => return,
        GamePhase::LifeLostPause => {
            // Simulation stays frozen while the message shows
            state.pause_ticks = state.pause_ticks.saturating_sub(1);
            if state.pause_ticks == 0 {
                state.respawn();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.invincible_ticks = state.invincible_ticks.saturating_sub(1);

    if step_player(state, input) == PlayerStep::ReachedExit {
        state.advance_level();
        return;
    }

    // A fall or hit freezes the rest of the tick
    if state.phase == GamePhase::Playing {
        step_enemies(state);
    }
    if state.phase == GamePhase::Playing {
        step_coins(state);
    }
}

/// Player physics: input, gravity, integration, boundary, platform landing
fn step_player(state: &mut GameState, input: &TickInput) -> PlayerStep {
    let player = &mut state.player;

    // Held movement keys pin the horizontal velocity; otherwise it decays
    // toward zero without ever snapping there (sliding deceleration).
    if input.left {
        player.vel.x = -PLAYER_SPEED;
    } else if input.right {
        player.vel.x = PLAYER_SPEED;
    } else {
        player.vel.x *= FRICTION;
    }

    if input.jump && player.on_ground {
        player.vel.y = -JUMP_IMPULSE;
        player.on_ground = false;
    }

    // Gravity applies unconditionally, every tick
    player.vel.y += GRAVITY;

    let top_at_tick_start = player.pos.y;
    player.pos += player.vel;

    // Touching the right boundary ends the level
    if player.pos.x + player.size.x >= LEVEL_WIDTH {
        return PlayerStep::ReachedExit;
    }
    player.pos.x = player.pos.x.clamp(0.0, LEVEL_WIDTH - player.size.x);

    // Landing pass: grounded is re-derived from scratch each tick. Only
    // top-landings are resolved; side and bottom contact pass through.
    player.on_ground = false;
    for platform in &state.platforms {
        if player.aabb().overlaps(&platform.aabb())
            && is_landing(player.vel.y, top_at_tick_start, platform.top())
        {
            player.pos.y = platform.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
    }

    // Fell off the level
    if state.player.pos.y > LEVEL_HEIGHT {
        state.lose_life();
    }

    PlayerStep::Moved
}

/// Enemy patrol and contact: stomp removes, anything else costs a life
fn step_enemies(state: &mut GameState) {
    // Snapshot the player for the whole pass, so contact outcomes don't
    // depend on enemy order.
    let player_box = state.player.aabb();
    let player_vy = state.player.vel.y;

    let mut stomped: Vec<usize> = Vec::new();
    let mut hit = false;

    for (idx, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.pos.x += enemy.vx;

        // Bounce off level edges
        if enemy.pos.x <= 0.0 || enemy.pos.x + enemy.size.x >= LEVEL_WIDTH {
            enemy.vx = -enemy.vx;
        }

        let hitbox = enemy.hitbox();
        if !player_box.overlaps(&hitbox) {
            continue;
        }

        // Exactly one of stomp or hit per overlap; stomp wins when its
        // geometry holds.
        if is_stomp(&player_box, player_vy, &hitbox) {
            stomped.push(idx);
        } else {
            hit = true;
        }
    }

    // Compact after the pass so removal never skips a neighbor
    if !stomped.is_empty() {
        state.player.vel.y = STOMP_BOUNCE;
        state.score += STOMP_SCORE * stomped.len() as u32;
        for idx in stomped.into_iter().rev() {
            state.enemies.remove(idx);
        }
    }
    if hit {
        state.lose_life();
    }
}

/// Coin collection: first contact only
fn step_coins(state: &mut GameState) {
    let player = state.player.aabb();
    for coin in &mut state.coins {
        if !coin.collected && player.overlaps(&coin.aabb()) {
            coin.collected = true;
            state.coins_collected += 1;
            state.score += COIN_SCORE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy};
    use glam::Vec2;

    /// A state with a known, empty-ish level: ground only, no enemies/coins
    fn bare_state() -> GameState {
        let mut state = GameState::new(12345);
        state.platforms.truncate(1); // Keep the ground
        state.enemies.clear();
        state.coins.clear();
        state
    }

    /// Run ticks until the player is resting on the ground
    fn settle(state: &mut GameState) {
        let input = TickInput::default();
        for _ in 0..120 {
            tick(state, &input);
            if state.player.on_ground {
                return;
            }
        }
        panic!("player never landed");
    }

    fn enemy_at(x: f32, vx: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, GROUND_Y - ENEMY_SIZE),
            size: Vec2::new(ENEMY_SIZE, ENEMY_SIZE),
            vx,
        }
    }

    #[test]
    fn test_gravity_applies_every_airborne_tick() {
        let mut state = bare_state();
        state.player.pos = Vec2::new(100.0, 100.0);
        state.player.vel = Vec2::ZERO;

        let input = TickInput::default();
        tick(&mut state, &input);
        assert_eq!(state.player.vel.y, GRAVITY);
        tick(&mut state, &input);
        assert_eq!(state.player.vel.y, GRAVITY * 2.0);
    }

    #[test]
    fn test_landing_invariant() {
        let mut state = bare_state();
        state.player.pos = Vec2::new(100.0, GROUND_Y - PLAYER_HEIGHT - 2.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default());
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.bottom(), GROUND_Y);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut state = bare_state();
        settle(&mut state);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        assert!(!state.player.on_ground);
        // Jump impulse, then gravity, within the same tick
        assert_eq!(state.player.vel.y, -JUMP_IMPULSE + GRAVITY);

        // Holding jump mid-air does nothing
        let vy = state.player.vel.y;
        tick(&mut state, &jump);
        assert_eq!(state.player.vel.y, vy + GRAVITY);
    }

    #[test]
    fn test_friction_decays_without_zeroing() {
        let mut state = bare_state();
        settle(&mut state);
        state.player.vel.x = PLAYER_SPEED;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vel.x, PLAYER_SPEED * FRICTION);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.vel.x, PLAYER_SPEED * FRICTION * FRICTION);
        assert!(state.player.vel.x > 0.0);
    }

    #[test]
    fn test_hold_right_until_level_advance() {
        let mut state = bare_state();
        settle(&mut state);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut last_x = state.player.pos.x;
        for _ in 0..400 {
            tick(&mut state, &right);
            if state.level == 2 {
                break;
            }
            assert!(state.player.pos.x > last_x, "x must increase each tick");
            assert!(state.player.pos.x <= LEVEL_WIDTH - PLAYER_WIDTH);
            last_x = state.player.pos.x;
        }
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_final_level_exit_is_victory() {
        let mut state = bare_state();
        state.level = MAX_LEVEL;
        state.lives = 1; // Victory must not care about remaining lives
        settle(&mut state);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..400 {
            tick(&mut state, &right);
            if state.phase == GamePhase::Victory {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_stomp_removes_enemy_and_bounces() {
        let mut state = bare_state();
        state.enemies.push(enemy_at(400.0, 0.0));
        // Descending onto the enemy, feet above the hitbox midpoint
        state.player.pos = Vec2::new(400.0, 300.0);
        state.player.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 0);
        assert_eq!(state.score, STOMP_SCORE);
        assert_eq!(state.player.vel.y, STOMP_BOUNCE);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_side_contact_is_a_hit_not_a_stomp() {
        let mut state = bare_state();
        state.enemies.push(enemy_at(400.0, 0.0));
        settle(&mut state);
        // Walk the player into the enemy at ground level
        state.player.pos.x = 390.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1, "hit must not remove the enemy");
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::LifeLostPause);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_pause_freezes_then_respawns_invincible() {
        let mut state = bare_state();
        state.enemies.push(enemy_at(400.0, 0.0));
        settle(&mut state);
        state.player.pos.x = 390.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LifeLostPause);

        // Frozen: the player does not move during the pause
        let frozen_pos = state.player.pos;
        let ticks_then = state.time_ticks;
        for _ in 0..LIFE_LOST_PAUSE_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::LifeLostPause);
            assert_eq!(state.player.pos, frozen_pos);
        }
        assert_eq!(state.time_ticks, ticks_then);

        // Pause expires: back to playing, at the start, invincible
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert!(state.invincible());
    }

    #[test]
    fn test_invincibility_suppresses_repeat_hits() {
        let mut state = bare_state();
        settle(&mut state);
        state.invincible_ticks = INVINCIBILITY_TICKS;
        // Park an enemy directly on the player
        let px = state.player.pos.x;
        state.enemies.push(enemy_at(px, 0.0));

        let lives = state.lives;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.lives, lives);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_fall_off_level_costs_a_life() {
        let mut state = bare_state();
        state.platforms.clear(); // Nothing to land on
        state.player.pos = Vec2::new(100.0, 300.0);

        let input = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &input);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.phase, GamePhase::LifeLostPause);
    }

    #[test]
    fn test_game_over_halts_simulation() {
        let mut state = bare_state();
        state.lives = 1;
        state.enemies.push(enemy_at(400.0, 0.0));
        settle(&mut state);
        state.player.pos.x = 390.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        let pos = state.player.pos;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_enemy_bounces_at_edges() {
        let mut state = bare_state();
        state.player.pos = Vec2::new(400.0, 100.0); // Out of the way
        state.enemies.push(enemy_at(1.0, -2.0));

        let input = TickInput::default();
        tick(&mut state, &input);
        assert!(state.enemies[0].vx > 0.0, "flips at the left edge");

        state.enemies[0].pos.x = LEVEL_WIDTH - ENEMY_SIZE - 1.0;
        tick(&mut state, &input);
        assert!(state.enemies[0].vx < 0.0, "flips at the right edge");
    }

    #[test]
    fn test_coin_collection_is_idempotent() {
        let mut state = bare_state();
        settle(&mut state);
        let px = state.player.pos;
        state.coins.push(Coin {
            pos: Vec2::new(px.x + 5.0, px.y + 5.0),
            size: Vec2::new(COIN_SIZE, COIN_SIZE),
            collected: false,
            glint_phase: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.coins[0].collected);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.score, COIN_SCORE);

        // Still overlapping on later ticks: no double counting
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.score, COIN_SCORE);
        assert_eq!(state.coins.len(), 1, "collected coins stay in the list");
    }

    #[test]
    fn test_restart_input_works_from_any_phase() {
        let mut state = bare_state();
        state.lives = 1;
        state.enemies.push(enemy_at(400.0, 0.0));
        settle(&mut state);
        state.player.pos.x = 390.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.platforms.is_empty());
        assert!((2..=5).contains(&state.enemies.len()));
        assert!((2..=5).contains(&state.coins.len()));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// After any single tick, the player either advanced the level or
            /// remains inside the horizontal bounds.
            #[test]
            fn player_x_stays_in_bounds(
                x in 0.0f32..770.0,
                vx in -10.0f32..10.0,
                left in any::<bool>(),
                right in any::<bool>(),
            ) {
                let mut state = bare_state();
                state.player.pos = Vec2::new(x, 100.0);
                state.player.vel.x = vx;
                let level_before = state.level;

                tick(&mut state, &TickInput { left, right, ..Default::default() });

                if state.level == level_before {
                    prop_assert!(state.player.pos.x >= 0.0);
                    prop_assert!(state.player.pos.x <= LEVEL_WIDTH - PLAYER_WIDTH);
                }
            }

            /// While airborne with no vertical event, vy increases by exactly
            /// the gravity constant.
            #[test]
            fn gravity_is_constant_increment(vy in -14.0f32..-1.0) {
                let mut state = bare_state();
                state.player.pos = Vec2::new(100.0, 200.0);
                state.player.vel = Vec2::new(0.0, vy);

                tick(&mut state, &TickInput::default());
                prop_assert_eq!(state.player.vel.y, vy + GRAVITY);
            }
        }
    }
}
