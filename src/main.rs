//! Neon Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_flap::audio::AudioManager;
    use neon_flap::consts::*;
    use neon_flap::renderer::{self, Frame, RenderError, RenderState};
    use neon_flap::sim::{GamePhase, GameState, TickInput, tick};
    use neon_flap::{BestScoreSlot, FrameClock, Settings, ThemeId, events};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        theme: ThemeId,
        settings: Settings,
        audio: AudioManager,
        best_slot: BestScoreSlot,
        render_state: Option<RenderState>,
        input: TickInput,
        clock: FrameClock,
        /// Cosmetic randomness only; never shared with the simulation
        fx_rng: Pcg32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let best_slot = BestScoreSlot::browser();
            let best = best_slot.load();
            Self {
                state: GameState::new(seed, best),
                theme: settings.theme,
                audio: AudioManager::new(&settings),
                best_slot,
                render_state: None,
                input: TickInput {
                    activate: false,
                    autopilot: settings.autopilot,
                },
                clock: FrameClock::new(),
                fx_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
                settings,
            }
        }

        /// Queue the activate action for the next tick
        fn activate(&mut self) {
            self.input.activate = true;
            self.audio.resume();
        }

        fn toggle_autopilot(&mut self) {
            self.input.autopilot = !self.input.autopilot;
            log::info!("Autopilot: {}", self.input.autopilot);
        }

        /// Switch palettes; only offered on the ready screen
        fn toggle_theme(&mut self) {
            if self.state.phase != GamePhase::Ready {
                return;
            }
            self.theme = self.theme.toggled();
            apply_theme_to_page(self.theme);
            log::info!("Theme: {}", self.theme.as_str());
        }

        /// Run one simulation tick and perform the side effects it asked for
        fn update(&mut self, time: f64) {
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input.activate = false;

            let audio = &self.audio;
            events::dispatch(self.state.drain_events(), &mut self.best_slot, |cue| {
                audio.play(cue)
            });

            self.clock.record(time);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let frame = Frame {
                theme: self.theme.theme(),
                settings: &self.settings,
                time_ms: time,
            };
            let vertices = renderer::build(&self.state, &frame, &mut self.fx_rng);

            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let phase = self.state.phase;
            let score = &self.state.score;

            set_visible(&document, "ready-screen", phase == GamePhase::Ready);
            set_visible(&document, "theme-btn", phase == GamePhase::Ready);
            set_visible(&document, "hud-score", phase == GamePhase::Playing);
            set_visible(&document, "game-over", phase == GamePhase::GameOver);
            set_visible(&document, "restart-hint", self.state.can_restart());
            set_visible(&document, "autopilot-badge", self.input.autopilot);

            set_text(&document, "#hud-score", &score.value.to_string());
            set_text(&document, "#final-score", &score.value.to_string());
            set_text(&document, "#best-score", &score.best.to_string());
            set_text(&document, "#hud-fps .hud-value", &self.clock.fps().to_string());
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            // No-op when the class already matches
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten()
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    /// Mirror the theme on the page: body class for CSS, button label
    fn apply_theme_to_page(theme: ThemeId) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(body) = document.body() {
            body.set_class_name(theme.as_str());
        }
        if let Some(btn) = document.get_element_by_id("theme-btn") {
            btn.set_text_content(Some(theme.label()));
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Neon Flap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("birdCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Logical 320x480, backing store scaled for sharp output
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr).round() as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr).round() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        apply_theme_to_page(game.borrow().theme);

        log::info!("Game initialized with seed: {}", seed);

        match init_renderer(canvas.clone(), width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                // Keep running: HUD, audio and scoring still work
                log::error!("WebGPU unavailable: {}", e);
            }
        }

        setup_input_handlers(&canvas, game.clone());
        setup_theme_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Neon Flap running!");
        Ok(())
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.activate();
                    }
                    "a" | "A" => g.toggle_autopilot(),
                    _ => {}
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (also suppresses the synthetic click)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let on_theme_btn = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .is_some_and(|el| el.id() == "theme-btn");
                if on_theme_btn {
                    return;
                }
                event.prevent_default();
                game.borrow_mut().activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_theme_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("theme-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Never counts as a flap
                event.stop_propagation();
                game.borrow_mut().toggle_theme();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One tick and one render per display refresh
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless run when no count is given (one minute)
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_flap::sim::{GamePhase, GameState, TickInput, tick};
    use neon_flap::{BestScoreSlot, Settings, events};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Flap (native) starting...");
    log::info!("Native mode runs the simulation headless - use `trunk serve` for the web version");

    let frames = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(n) => n,
            Err(e) => {
                log::warn!("Bad frame count {:?} ({}), using {}", arg, e, DEFAULT_FRAMES);
                DEFAULT_FRAMES
            }
        },
        None => DEFAULT_FRAMES,
    };

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(0);
    let mut best_slot = BestScoreSlot::browser();
    let mut state = GameState::new(seed, best_slot.load());
    let input = TickInput {
        activate: false,
        autopilot: true,
    };

    let mut runs = 0u32;
    for _ in 0..frames {
        let was_over = state.phase == GamePhase::GameOver;
        tick(&mut state, &input);
        if !was_over && state.phase == GamePhase::GameOver {
            runs += 1;
        }
        // No audio headless
        events::dispatch(state.drain_events(), &mut best_slot, |cue| {
            log::trace!("Cue {:?}", cue)
        });
    }

    log::info!(
        "Simulated {} frames (seed {}): {} crashes, current score {}, best {}",
        frames,
        seed,
        runs,
        state.score.value,
        state.score.best
    );
}
