//! Ledge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use ledge_runner::consts::*;
    use ledge_runner::render::draw_frame;
    use ledge_runner::sim::{GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        input: TickInput,
    }

    impl Game {
        /// Run one simulation tick and present the result
        fn frame(&mut self) {
            tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.restart = false;

            draw_frame(&self.ctx, &self.state);
            update_hud(&self.state);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(LEVEL_WIDTH as u32);
        canvas.set_height(LEVEL_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            ctx,
            input: TickInput::default(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Ledge Runner running!");
    }

    /// Map held keys onto the input snapshot
    fn apply_key(input: &mut TickInput, key: &str, held: bool) {
        match key {
            "ArrowLeft" | "a" | "A" => input.left = held,
            "ArrowRight" | "d" | "D" => input.right = held,
            " " | "ArrowUp" | "w" | "W" => input.jump = held,
            // One-shot; the frame loop clears it after the tick
            "r" | "R" => {
                if held {
                    input.restart = true;
                }
            }
            _ => {}
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                apply_key(&mut game.borrow_mut().input, &event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                apply_key(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Update HUD text elements in the DOM
    fn update_hud(state: &GameState) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let fields = [
            ("score", state.score.to_string()),
            ("level", state.level.to_string()),
            ("lives", state.lives.to_string()),
            ("coins", state.coins_collected.to_string()),
        ];
        for (id, value) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&value));
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ledge_runner::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Ledge Runner (native) starting...");
    log::info!("The game targets the browser - build with `trunk serve` for the web version");

    // Headless smoke run: hold right for ten seconds of simulated time
    let mut state = GameState::new(42);
    let input = TickInput {
        right: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input);
        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
    }
    println!(
        "Headless run: level={} lives={} score={} coins={} phase={:?}",
        state.level, state.lives, state.score, state.coins_collected, state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
