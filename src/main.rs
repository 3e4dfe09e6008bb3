//! Sky Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//!
//! The web page is expected to provide a `#canvas` element plus the HUD
//! elements `#score`, `#best-score`, `#final-score`, `#final-best`,
//! `#start-screen`, `#game-over`, `#start-btn` and `#restart-btn`. An optional
//! `<script id="tuning" type="application/json">` overrides game balance.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_flap::audio::{AudioManager, SoundEffect, SoundSink};
    use sky_flap::consts::SIM_DT;
    use sky_flap::persistence::LocalStorageStore;
    use sky_flap::platform::{Action, HudText, RawInput, translate};
    use sky_flap::renderer::{RenderState, build_frame};
    use sky_flap::sim::GamePhase;
    use sky_flap::{ConfigError, Session, Surface, Tuning};

    /// What the HUD currently shows, so the DOM is only touched on change
    #[derive(Default, PartialEq)]
    struct HudView {
        score: Option<u32>,
        best: Option<u32>,
        phase: Option<GamePhase>,
        popped: bool,
    }

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorageStore>,
        audio: AudioManager,
        render_state: Option<RenderState>,
        last_time: f64,
        hud: HudView,
    }

    impl Game {
        fn new(surface: Surface, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
            Ok(Self {
                session: Session::new(surface, tuning, seed, LocalStorageStore::new())?,
                audio: AudioManager::new(),
                render_state: None,
                last_time: 0.0,
                hud: HudView::default(),
            })
        }

        /// Route a platform event; returns true when its default must be suppressed
        fn on_input(&mut self, raw: RawInput) -> bool {
            let Some(binding) = translate(&raw) else {
                return false;
            };
            // Every bound input is a user gesture
            self.audio.resume();
            match binding.action {
                Action::ToggleMute => {
                    self.audio.toggle_muted();
                }
                action => self.session.handle(action),
            }
            binding.suppress_default
        }

        /// Run simulation ticks and play their sounds
        fn update(&mut self, dt: f32) {
            let best_before = self.session.best_score();
            let events = self.session.advance(dt);
            self.audio.play_events(&events);
            if self.session.best_score() > best_before {
                self.audio.play(SoundEffect::NewBest);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_frame(&self.session.snapshot());
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    let view = render_state.view;
                    render_state.resize(w, h, view);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let snap = self.session.snapshot();
            let next = HudView {
                score: Some(snap.score),
                best: Some(snap.best_score),
                phase: Some(snap.phase),
                popped: snap.score_pop_ticks > 0,
            };
            if next == self.hud {
                return;
            }

            let text = HudText::from_snapshot(&snap);
            if next.score != self.hud.score {
                set_text(document, "score", &text.score);
                set_text(document, "final-score", &text.final_score);
            }
            if next.best != self.hud.best {
                set_text(document, "best-score", &text.best);
                set_text(document, "final-best", &text.final_best);
            }
            if next.popped != self.hud.popped {
                if let Some(el) = document.get_element_by_id("score") {
                    let _ = el.class_list().toggle_with_force("score-pop", next.popped);
                }
            }
            if next.phase != self.hud.phase {
                set_hidden(document, "start-screen", snap.phase != GamePhase::Menu);
                set_hidden(document, "game-over", snap.phase != GamePhase::GameOver);
            }

            self.hud = next;
        }

        /// Canvas changed size
        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let (css_w, css_h, width, height) = canvas_size(canvas, dpr);
            let resized = Surface::new(css_w, css_h).and_then(|s| self.session.resize(s));
            if let Err(e) = resized {
                log::warn!("Ignoring resize: {}", e);
                return;
            }
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height, (css_w, css_h));
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// CSS size and backbuffer size of the canvas
    fn canvas_size(canvas: &HtmlCanvasElement, dpr: f64) -> (f32, f32, u32, u32) {
        let css_w = canvas.client_width().max(1);
        let css_h = canvas.client_height().max(1);
        let width = (css_w as f64 * dpr) as u32;
        let height = (css_h as f64 * dpr) as u32;
        (css_w as f32, css_h as f32, width, height)
    }

    /// Balance override from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Result<Tuning, JsValue> {
        let Some(text) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Ok(Tuning::default());
        };
        let tuning = Tuning::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Loaded tuning override");
        Ok(tuning)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Flap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let (css_w, css_h, width, height) = canvas_size(&canvas, dpr);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning(&document)?;
        let surface =
            Surface::new(css_w, css_h).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(surface, tuning, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(game));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, (css_w, css_h))
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(&window, &canvas, game.clone());

        request_animation_frame(game);

        log::info!("Sky Flap running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard (action key flaps and restarts)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().on_input(RawInput::KeyDown(event.code())) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse press on the play area
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if game.borrow_mut().on_input(RawInput::PointerDown) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (default suppressed so no emulated mouse event follows)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if game.borrow_mut().on_input(RawInput::TouchStart) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().on_input(RawInput::StartButton);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            game.borrow_mut().resize(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Native runner: one autopiloted run, no window

    use std::error::Error;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use sky_flap::audio::{AudioManager, SoundSink};
    use sky_flap::persistence::FileStore;
    use sky_flap::platform::Action;
    use sky_flap::sim::{GamePhase, GameState};
    use sky_flap::{Session, Surface, Tuning};

    /// Give up after five minutes of simulated play
    const MAX_TICKS: u32 = 60 * 60 * 5;

    fn load_tuning() -> Result<Tuning, Box<dyn Error>> {
        let Ok(path) = std::env::var("SKYFLAP_TUNING") else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(&path)?;
        let tuning = Tuning::from_json(&json)?;
        log::info!("Loaded tuning from {}", path);
        Ok(tuning)
    }

    /// `SKYFLAP_BEST_FILE`, else the per-user data directory
    fn best_score_path() -> Result<PathBuf, Box<dyn Error>> {
        if let Ok(path) = std::env::var("SKYFLAP_BEST_FILE") {
            return Ok(PathBuf::from(path));
        }
        Ok(FileStore::default_path().ok_or("could not determine a data directory")?)
    }

    /// Flap when falling below the middle of the next gap
    fn should_flap(state: &GameState) -> bool {
        let bird = &state.bird;
        let target = state
            .pipes
            .iter()
            .find(|p| p.trailing_edge() > bird.pos.x - bird.width / 2.0)
            .map(|p| p.gap_top() + p.gap / 2.0)
            .unwrap_or(state.surface.height / 2.0);
        bird.velocity >= 0.0 && bird.pos.y > target + 30.0
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let tuning = load_tuning()?;
        let best_file = best_score_path()?;
        log::info!("Best score file: {}", best_file.display());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let surface = Surface::new(480.0, 640.0)?;
        let mut session = Session::new(surface, tuning, seed, FileStore::new(best_file))?;
        let mut audio = AudioManager::new();

        session.handle(Action::Start);
        let mut ticks = 0;
        while ticks < MAX_TICKS && session.phase() == GamePhase::Running {
            if should_flap(session.state()) {
                session.handle(Action::Flap);
            }
            let events = session.step();
            audio.play_events(&events);
            ticks += 1;
        }

        log::info!(
            "Run finished after {} ticks: score {}, best {}",
            ticks,
            session.score(),
            session.best_score()
        );
        println!("score {} (best {})", session.score(), session.best_score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Sky Flap (native) starting...");
    log::info!("Native mode runs a headless autopilot; the playable build targets wasm32");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
