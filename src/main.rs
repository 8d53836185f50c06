//! Pidgey Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlInputElement, PointerEvent};

    use pidgey_flap::sim::{GameEvent, GameState, RenderSnapshot, TickInput, tick};
    use pidgey_flap::{BestScore, Settings};

    // JS binding for the page-side renderer. The page registers
    // window.__pidgeyRender and draws each frame from the snapshot JSON.
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (window.__pidgeyRender) {
                window.__pidgeyRender(json);
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        best: BestScore,
        settings: Settings,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                state: GameState::new(seed),
                best: BestScore::load(),
                settings,
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Run one simulation step and commit any finished run
        fn update(&mut self, dt: f32) {
            self.input.hard = self.settings.hard;
            tick(&mut self.state, &self.input, dt);

            // Clear one-shot inputs after processing
            self.input.primary = false;
            self.input.reset = false;
            self.input.help = false;

            for event in self.state.take_events() {
                match event {
                    GameEvent::RunEnded { score } => {
                        // commit_run persists on a new high
                        if self.best.commit_run(score) {
                            log::info!("new best score: {}", score);
                        }
                    }
                    GameEvent::BerryTaken { kind, score_award } => {
                        log::debug!("picked up {:?} (+{})", kind, score_award);
                    }
                    _ => {}
                }
            }
        }

        fn render(&self) {
            let snapshot = RenderSnapshot::capture(&self.state, self.best.best);
            match serde_json::to_string(&snapshot) {
                Ok(json) => render_frame(&json),
                Err(err) => log::error!("snapshot serialization failed: {}", err),
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best") {
                el.set_text_content(Some(&self.best.best.to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Pidgey Flap starting with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_hard_toggle(game.clone());

        request_animation_frame(game);

        log::info!("Pidgey Flap running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        g.input.primary = true;
                    }
                    "r" | "R" => g.input.reset = true,
                    "h" | "H" => g.input.help = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer (mouse and touch)
        {
            let document = window.document().unwrap();
            if let Some(canvas) = document.get_element_by_id("canvas") {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.primary = true;
                });
                let _ = canvas.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }

    fn setup_hard_toggle(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(el) = document.get_element_by_id("chkHard") else {
            return;
        };
        let Ok(checkbox) = el.dyn_into::<HtmlInputElement>() else {
            return;
        };

        // Reflect the persisted setting on load
        checkbox.set_checked(game.borrow().settings.hard);

        let checkbox_clone = checkbox.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.settings.hard = checkbox_clone.checked();
            g.settings.save();
            log::info!("hard mode: {}", g.settings.hard);
        });
        let _ = checkbox.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pidgey_flap::BestScore;
    use pidgey_flap::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Pidgey Flap (native) demo run, seed: {}", seed);
    log::info!("Browser version is the real game - run with `trunk serve`");

    let mut state = GameState::new(seed);
    let mut best = BestScore::load();
    let dt = 1.0 / 60.0;

    // Press through the menu, then autopilot toward each upcoming gap
    // for up to two minutes of simulated time.
    let mut input = TickInput {
        primary: true,
        ..TickInput::default()
    };
    for _ in 0..(120 * 60) {
        tick(&mut state, &input, dt);

        let target_y = state
            .pipes
            .iter()
            .find(|p| p.trailing_edge(&state.tuning) > state.bird.pos.x)
            .map(|p| p.gap_y)
            .unwrap_or_else(|| state.tuning.bird_start_y());
        input.primary = state.phase != GamePhase::Playing || state.bird.pos.y > target_y;

        for event in state.take_events() {
            match event {
                GameEvent::PipePassed { .. } => log::debug!("score: {}", state.score),
                GameEvent::RunEnded { score } => {
                    log::info!("run ended with score {}", score);
                    best.commit_run(score);
                }
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!("demo finished: score {}, best {}", state.score, best.best);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
