//! Side Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use side_runner::platform::{
        Clock, FrameDriver, FrameStatus, InputAction, key_action, pointer_action,
    };
    use side_runner::renderer::{build_draw_list, hud_lines};
    use side_runner::sim::{GamePhase, GameState};
    use side_runner::{Settings, Tuning};

    /// Clock backed by `performance.now()`
    struct BrowserClock {
        performance: web_sys::Performance,
    }

    impl Clock for BrowserClock {
        fn now_secs(&self) -> f64 {
            self.performance.now() / 1000.0
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<BrowserClock>,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        /// rAF callback pending
        loop_running: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Paint the draw list and HUD onto the 2D context
        fn render(&self) {
            let state = self.driver.state();
            let settings = self.driver.settings();
            let sx = f64::from(self.canvas.width()) / f64::from(state.tuning.screen_width);
            let sy = f64::from(self.canvas.height()) / f64::from(state.tuning.screen_height);
            let _ = self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0);

            for rect in build_draw_list(state, settings) {
                let color = css_color(rect.color);
                let (x, y, w, h) = (
                    f64::from(rect.x),
                    f64::from(rect.y),
                    f64::from(rect.w),
                    f64::from(rect.h),
                );
                if rect.outline {
                    self.ctx.set_stroke_style_str(&color);
                    self.ctx.set_line_width(1.0);
                    self.ctx.stroke_rect(x, y, w, h);
                } else {
                    self.ctx.set_fill_style_str(&color);
                    self.ctx.fill_rect(x, y, w, h);
                }
            }

            self.ctx.set_fill_style_str("#ffffff");
            self.ctx.set_font("16px monospace");
            let fps = settings.show_fps.then_some(self.fps);
            for (i, line) in hud_lines(state, settings, fps).iter().enumerate() {
                let _ = self.ctx.fill_text(line, 12.0, 24.0 + i as f64 * 20.0);
            }
        }
    }

    fn css_color(c: [f32; 4]) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (c[0] * 255.0).round() as u8,
            (c[1] * 255.0).round() as u8,
            (c[2] * 255.0).round() as u8,
            c[3]
        )
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Side Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = Tuning::default();
        let dpr = window.device_pixel_ratio();
        canvas.set_width((f64::from(tuning.screen_width) * dpr) as u32);
        canvas.set_height((f64::from(tuning.screen_height) * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let clock = BrowserClock {
            performance: window.performance().ok_or("no performance")?,
        };

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let state = GameState::with_tuning(seed, tuning);
        let driver = FrameDriver::new(state, clock).with_settings(Settings::load());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            driver,
            ctx,
            canvas: canvas.clone(),
            loop_running: false,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        // Start game loop
        start_loop(&game);

        log::info!("Side Runner running!");
        Ok(())
    }

    /// Route an action to the driver and restart the loop if it was re-armed
    fn dispatch(game: &Rc<RefCell<Game>>, action: InputAction) {
        let rearmed = game.borrow_mut().driver.handle(action);
        if rearmed {
            start_loop(game);
        } else if !game.borrow().loop_running {
            // Stopped loop still repaints toggles and the pause screen
            game.borrow().render();
        }
    }

    fn start_loop(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        if g.loop_running {
            return;
        }
        g.loop_running = true;
        drop(g);
        request_animation_frame(game.clone());
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(action) = key_action(&event.code(), event.ctrl_key(), true) {
                    // Keep Space/arrows from scrolling and Ctrl+D from bookmarking
                    event.prevent_default();
                    dispatch(&game, action);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard up (duck release)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = key_action(&event.code(), event.ctrl_key(), false) {
                    dispatch(&game, action);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down (mouse, touch, pen) jumps
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                dispatch(&game, pointer_action());
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.driver.state().phase == GamePhase::Playing {
                        g.driver.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.driver.state().phase == GamePhase::Playing {
                    g.driver.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let status = g.driver.frame();
            g.track_fps(time);
            g.render();
            match status {
                FrameStatus::Continue { .. } => true,
                FrameStatus::Stopped { .. } => {
                    g.loop_running = false;
                    false
                }
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use side_runner::consts::SIM_DT;
    use side_runner::platform::{Clock, FrameDriver, FrameStatus, InputAction, ManualClock};
    use side_runner::sim::{GamePhase, GameState};
    use side_runner::{SessionScores, Tuning};

    /// Headless demo options: `side-runner [seed] [runs] [max_seconds]`
    pub struct Options {
        pub seed: u64,
        pub runs: u32,
        pub max_seconds: f64,
    }

    impl Options {
        pub fn from_args() -> Self {
            let args: Vec<String> = std::env::args().skip(1).collect();
            let arg = |i: usize| args.get(i).map(String::as_str);
            Self {
                seed: arg(0).and_then(|s| s.parse().ok()).unwrap_or(1),
                runs: arg(1).and_then(|s| s.parse().ok()).unwrap_or(5),
                max_seconds: arg(2).and_then(|s| s.parse().ok()).unwrap_or(120.0),
            }
        }
    }

    /// Tuning from `RUNNER_TUNING`, falling back to defaults
    pub fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("RUNNER_TUNING") else {
            return Tuning::default();
        };
        match Tuning::load_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Play autopilot runs on a simulated clock
    pub fn run(options: &Options, tuning: Tuning) -> SessionScores {
        let clock = ManualClock::new(0.0);
        let mut driver = FrameDriver::new(GameState::with_tuning(options.seed, tuning), &clock);
        driver.handle(InputAction::ToggleAutopilot);

        for run in 0..options.runs {
            if run > 0 {
                driver.handle(InputAction::Restart);
            }
            let started = clock.now_secs();
            loop {
                clock.advance(f64::from(SIM_DT));
                if let FrameStatus::Stopped { .. } = driver.frame() {
                    break;
                }
                if clock.now_secs() - started >= options.max_seconds {
                    log::info!(
                        "Run {} still alive after {:.0}s (score {})",
                        run + 1,
                        options.max_seconds,
                        driver.state().score
                    );
                    break;
                }
            }
            if driver.state().phase == GamePhase::GameOver {
                log::info!("Run {} ended: {:?}", run + 1, driver.state().last_cause);
            }
        }

        driver.teardown();
        driver.scores().clone()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Side Runner (native) starting...");
    log::info!("Native mode plays headless autopilot runs - use the wasm build to play");

    let options = native::Options::from_args();
    let tuning = native::load_tuning();
    let scores = native::run(&options, tuning);

    match serde_json::to_string_pretty(&scores) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
