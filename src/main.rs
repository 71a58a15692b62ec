//! Reflex Lab entry point
//!
//! Browser builds wire the engine to a canvas; native builds run a headless
//! time-attack session with a simulated player.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use reflex_lab::platform::web::AnimationFrameScheduler;
    use reflex_lab::renderer::CanvasSurface;
    use reflex_lab::{
        Engine, OutcomeRecorder, SessionHistory, SessionStats, Settings, SettingsChange,
    };

    type App = Rc<RefCell<Engine<CanvasSurface>>>;

    /// Outcome sink for the page: live stats plus persisted history
    struct Scoreboard {
        stats: SessionStats,
        history: SessionHistory,
        settings: Settings,
        /// A session has started and not yet been saved
        open: bool,
    }

    impl Scoreboard {
        fn begin(&mut self, settings: &Settings) {
            self.stats.reset();
            self.settings = settings.clone();
            self.open = true;
        }

        /// Save the session once, on time-up or stop
        fn finish(&mut self) {
            if !self.open {
                return;
            }
            self.open = false;
            if self
                .history
                .record(&self.stats, &self.settings, js_sys::Date::now())
                .is_some()
            {
                self.history.save();
            }
        }
    }

    impl OutcomeRecorder for Scoreboard {
        fn on_hit(&mut self, reaction_ms: u64) {
            self.stats.on_hit(reaction_ms);
        }

        fn on_miss(&mut self) {
            self.stats.on_miss();
        }

        fn on_end(&mut self) {
            self.stats.on_end();
            self.finish();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Reflex Lab starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        fit_canvas(&canvas);

        let settings = Settings::load();
        let scoreboard = Rc::new(RefCell::new(Scoreboard {
            stats: SessionStats::new(),
            history: SessionHistory::load(),
            settings: settings.clone(),
            open: false,
        }));

        let surface = CanvasSurface::new(canvas.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scheduler = AnimationFrameScheduler::new();
        let frames = scheduler.handler_slot();
        let app: App = Rc::new(RefCell::new(
            Engine::new(surface, settings, Box::new(scoreboard.clone()))
                .with_scheduler(Box::new(scheduler)),
        ));

        {
            let app = Rc::downgrade(&app);
            let scoreboard = scoreboard.clone();
            frames.set(Rc::new(move |token| {
                if let Some(app) = app.upgrade() {
                    app.borrow_mut().frame(token);
                    update_hud(&scoreboard.borrow().stats);
                }
            }));
        }

        setup_input_handlers(&canvas, app.clone(), scoreboard.clone());
        setup_auto_pause(app.clone());
        setup_resize(canvas, app);

        log::info!("Reflex Lab ready - press Enter to start");
        Ok(())
    }

    /// Match the canvas backing store to its CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        canvas.set_width(canvas.client_width().max(0) as u32);
        canvas.set_height(canvas.client_height().max(0) as u32);
    }

    fn update_hud(stats: &SessionStats) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let fields = [
            ("hud-hits", stats.hits.to_string()),
            ("hud-accuracy", format!("{:.1}%", stats.accuracy())),
            ("hud-reaction", format!("{} ms", stats.average_reaction_ms())),
            ("hud-streak", stats.hit_streak.to_string()),
        ];
        for (id, text) in fields {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(&text));
            }
        }
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        app: App,
        scoreboard: Rc<RefCell<Scoreboard>>,
    ) {
        // Clicks (offset coordinates are canvas-local)
        {
            let app = app.clone();
            let scoreboard = scoreboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let outcome = app
                    .borrow_mut()
                    .handle_click(event.offset_x() as f32, event.offset_y() as f32);
                if outcome.is_some() {
                    update_hud(&scoreboard.borrow().stats);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "Enter" => {
                        let mut engine = app.borrow_mut();
                        let mut board = scoreboard.borrow_mut();
                        board.finish();
                        board.begin(engine.settings());
                        drop(board);
                        engine.start();
                    }
                    " " => {
                        event.prevent_default();
                        app.borrow_mut().toggle_pause();
                    }
                    "Escape" => {
                        app.borrow_mut().stop();
                        scoreboard.borrow_mut().finish();
                    }
                    key => {
                        if let Some(change) = SettingsChange::from_key(key) {
                            let mut engine = app.borrow_mut();
                            let settings = engine.settings().with_change(change);
                            settings.save();
                            engine.update_settings(settings);
                        }
                    }
                }
                update_hud(&scoreboard.borrow().stats);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut engine = app.borrow_mut();
                    if engine.is_running() {
                        engine.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut engine = app.borrow_mut();
                if engine.is_running() {
                    engine.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, app: App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas);
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Reflex Lab (native) starting...");
    log::info!("The interactive arena runs in the browser - build for wasm32 to play");

    demo::run();
}

/// Headless time-attack session against a simulated player
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use reflex_lab::platform::ManualClock;
    use reflex_lab::renderer::RecordingSurface;
    use reflex_lab::scheduler::FrameQueue;
    use reflex_lab::sim::SessionPhase;
    use reflex_lab::{
        ClickOutcome, Difficulty, Engine, SessionHistory, SessionStats, Settings, TrainingMode,
    };

    /// ~60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Safety net in case the session never ends
    const MAX_FRAMES: u32 = 60 * 60;

    pub fn run() {
        let settings = Settings {
            mode: TrainingMode::TimeAttack,
            difficulty: Difficulty::Hard,
            ..Settings::default()
        };

        let stats = Rc::new(RefCell::new(SessionStats::new()));
        let frames = FrameQueue::new();
        let wall = ManualClock::new(0.0);
        let mut engine = Engine::new(
            RecordingSurface::new(1280.0, 720.0),
            settings.clone(),
            Box::new(stats.clone()),
        )
        .with_scheduler(Box::new(frames.clone()))
        .with_time_source(Box::new(wall.clone()))
        .with_seed(7);

        let mut player = Pcg32::seed_from_u64(11);
        // Reaction time the player needs before clicking the oldest target
        let mut reaction = player.random_range(180.0..320.0);

        engine.start();
        let mut frame_count = 0;
        while engine.phase() != SessionPhase::Stopped && frame_count < MAX_FRAMES {
            frame_count += 1;
            wall.advance(FRAME_MS);

            // Take a short break halfway through
            if frame_count == 900 {
                engine.pause();
                wall.advance(5_000.0);
                engine.resume();
            }

            let now = engine.session_time();
            let aim = engine
                .targets()
                .first()
                .filter(|t| t.age(now) >= reaction)
                .map(|t| (t.pos, t.current_radius()));

            if let Some((pos, radius)) = aim {
                // Overshoot by up to 1.3 radii, so some clicks miss
                let spread = radius * 1.3;
                let x = pos.x + player.random_range(-spread..=spread);
                let y = pos.y + player.random_range(-spread..=spread);
                match engine.handle_click(x, y) {
                    Some(ClickOutcome::Hit { reaction_ms, .. }) => {
                        log::debug!("hit in {} ms", reaction_ms)
                    }
                    Some(ClickOutcome::Miss) => log::debug!("miss"),
                    None => {}
                }
                reaction = player.random_range(180.0..320.0);
            }

            if let Some(token) = frames.pop() {
                engine.frame(token);
            }
        }

        let stats = stats.borrow();
        let mut history = SessionHistory::new();
        history.record(&stats, &settings, 0.0);

        println!("\nTime attack ({} frames)", frame_count);
        println!("  hits:          {}", stats.hits);
        println!("  misses:        {}", stats.misses);
        println!("  accuracy:      {:.1}%", stats.accuracy());
        println!("  avg reaction:  {} ms", stats.average_reaction_ms());
        match stats.best_reaction_ms {
            Some(best) => println!("  best reaction: {} ms", best),
            None => println!("  best reaction: -"),
        }
        println!("  best streak:   {}", stats.best_streak);
        println!("  time up:       {}", stats.ended);
        log::info!("{} session(s) in history", history.sessions.len());
    }
}
