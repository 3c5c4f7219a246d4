//! Canvas-2D presentation
//!
//! Pure function of the simulation state; nothing here feeds back into the
//! sim. Cosmetic `Result`s from the 2D context are ignored.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, PlatformKind};

/// Draw one frame of the current game state
pub fn draw_frame(ctx: &CanvasRenderingContext2d, state: &GameState) {
    draw_background(ctx);
    draw_platforms(ctx, state);
    draw_coins(ctx, state);
    draw_enemies(ctx, state);
    draw_player(ctx, state);
    draw_overlay(ctx, state);
}

fn draw_background(ctx: &CanvasRenderingContext2d) {
    let w = LEVEL_WIDTH as f64;
    let h = LEVEL_HEIGHT as f64;

    // Sky gradient
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    let _ = gradient.add_color_stop(0.0, "#87CEEB");
    let _ = gradient.add_color_stop(1.0, "#98FB98");
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);

    // Clouds
    ctx.set_fill_style_str("#FFFFFF");
    for &(cx, cy) in &[(100.0, 80.0), (500.0, 60.0)] {
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, 20.0, 0.0, TAU);
        let _ = ctx.arc(cx + 20.0, cy, 25.0, 0.0, TAU);
        let _ = ctx.arc(cx + 40.0, cy, 20.0, 0.0, TAU);
        ctx.fill();
    }
}

fn draw_platforms(ctx: &CanvasRenderingContext2d, state: &GameState) {
    for platform in &state.platforms {
        let color = match platform.kind {
            PlatformKind::Ground => "#8B4513",
            PlatformKind::Ledge => "#228B22",
        };
        ctx.set_fill_style_str(color);
        ctx.fill_rect(
            platform.pos.x as f64,
            platform.pos.y as f64,
            platform.size.x as f64,
            platform.size.y as f64,
        );

        // Dirt lip along the top
        ctx.set_fill_style_str("#654321");
        ctx.fill_rect(
            platform.pos.x as f64,
            platform.pos.y as f64,
            platform.size.x as f64,
            5.0,
        );
    }
}

fn draw_coins(ctx: &CanvasRenderingContext2d, state: &GameState) {
    for coin in &state.coins {
        if coin.collected {
            continue;
        }
        let cx = (coin.pos.x + coin.size.x / 2.0) as f64;
        let cy = (coin.pos.y + coin.size.y / 2.0) as f64;
        let r = (coin.size.x / 2.0) as f64;

        ctx.set_fill_style_str("#FFD700");
        ctx.begin_path();
        let _ = ctx.arc(cx, cy, r, 0.0, TAU);
        ctx.fill();

        // Shine spot, nudged by the coin's glint phase
        let glint = coin.glint_phase as f64;
        ctx.set_fill_style_str("#FFFFFF");
        ctx.begin_path();
        let _ = ctx.arc(cx - 2.0 + glint.cos(), cy - 2.0 + glint.sin(), 3.0, 0.0, TAU);
        ctx.fill();
    }
}

fn draw_enemies(ctx: &CanvasRenderingContext2d, state: &GameState) {
    for enemy in &state.enemies {
        let (x, y) = (enemy.pos.x as f64, enemy.pos.y as f64);
        ctx.set_fill_style_str("#8B0000");
        ctx.fill_rect(x, y, enemy.size.x as f64, enemy.size.y as f64);

        // Eyes
        ctx.set_fill_style_str("#FFFFFF");
        ctx.fill_rect(x + 5.0, y + 5.0, 5.0, 5.0);
        ctx.fill_rect(x + 15.0, y + 5.0, 5.0, 5.0);
        ctx.set_fill_style_str("#000000");
        ctx.fill_rect(x + 6.0, y + 6.0, 3.0, 3.0);
        ctx.fill_rect(x + 16.0, y + 6.0, 3.0, 3.0);
    }
}

fn draw_player(ctx: &CanvasRenderingContext2d, state: &GameState) {
    // Blink while invincible
    if state.invincible() && (state.invincible_ticks / 8) % 2 == 0 {
        return;
    }

    let p = &state.player;
    let (x, y) = (p.pos.x as f64, p.pos.y as f64);
    let (w, h) = (p.size.x as f64, p.size.y as f64);

    ctx.set_fill_style_str("#FF0000");
    ctx.fill_rect(x, y, w, h);
    // Hat brim
    ctx.fill_rect(x - 5.0, y - 5.0, w + 10.0, 10.0);
    // Face
    ctx.set_fill_style_str("#FFE4B5");
    ctx.fill_rect(x + 5.0, y + 5.0, w - 10.0, 10.0);
    // Overalls
    ctx.set_fill_style_str("#0000FF");
    ctx.fill_rect(x + 5.0, y + 15.0, w - 10.0, 15.0);
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, state: &GameState) {
    let (title, detail) = match state.phase {
        GamePhase::Playing => return,
        GamePhase::LifeLostPause => ("OUCH!", format!("Lives left: {}", state.lives)),
        GamePhase::GameOver => (
            "GAME OVER",
            format!(
                "Final score: {}  Coins: {}",
                state.score, state.coins_collected
            ),
        ),
        GamePhase::Victory => (
            "YOU WIN!",
            format!(
                "Final score: {}  Coins: {}",
                state.score, state.coins_collected
            ),
        ),
    };

    let w = LEVEL_WIDTH as f64;
    let h = LEVEL_HEIGHT as f64;

    ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_text_align("center");
    ctx.set_font("48px Arial");
    let _ = ctx.fill_text(title, w / 2.0, h / 2.0 - 50.0);
    ctx.set_font("24px Arial");
    let _ = ctx.fill_text(&detail, w / 2.0, h / 2.0);
    if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
        let _ = ctx.fill_text("Press R to restart", w / 2.0, h / 2.0 + 50.0);
    }
}
