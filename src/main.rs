//! Burning Tennis entry point
//!
//! The browser build wires the canvas, WebGPU and DOM listeners to the
//! game and drives it from requestAnimationFrame. The native build has no
//! window; it plays an AI-vs-AI match on a synthetic clock and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use burning_tennis::audio::AudioManager;
    use burning_tennis::platform::time::PerformanceClock;
    use burning_tennis::platform::{InputState, Key, Viewport, time_seed};
    use burning_tennis::renderer::{RenderState, scene_vertices};
    use burning_tennis::sim::{Command, Control, Game, GameRng};
    use burning_tennis::{Scene, Settings, StartupError};

    /// Everything the page keeps alive between frames
    struct App {
        game: Game<PerformanceClock>,
        rng: GameRng,
        input: InputState,
        audio: AudioManager,
        settings: Settings,
        render_state: Option<RenderState>,
        /// Canvas in CSS pixels, for mapping touches
        css_view: Viewport,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        /// Returns false once the player has quit
        fn frame(&mut self, time: f64) -> bool {
            for command in self.input.drain_commands() {
                if command == Command::Start {
                    self.audio.resume();
                }
                if self.game.handle(command, &mut self.rng) == Control::Quit {
                    return false;
                }
            }

            if self.input.take_mute_toggles() % 2 == 1 {
                self.settings.muted = !self.settings.muted;
                self.audio.set_muted(self.settings.muted);
                self.settings.save();
                log::info!("Sound {}", if self.settings.muted { "off" } else { "on" });
            }

            let input = self.input.tick_input();
            self.game.frame(&input, &mut self.rng, &mut self.audio);

            let scene = Scene::capture(&self.game, self.input.scheme(), &self.settings);
            self.render(&scene);
            self.track_fps(time);
            self.update_hud(&scene);
            true
        }

        fn render(&mut self, scene: &Scene) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&scene_vertices(scene)) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Text lives in the page overlay, not on the canvas
        fn update_hud(&self, scene: &Scene) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "message", scene.message().unwrap_or(""));
            set_hidden(&document, "message", scene.message().is_none());

            match scene {
                Scene::Playing(table) => {
                    set_text(&document, "score", &table.score_text);
                    set_hidden(&document, "score", false);
                    match &table.banner {
                        Some(banner) => {
                            set_text(&document, "burning", banner.text);
                            set_opacity(&document, "burning", banner.alpha);
                            set_hidden(&document, "burning", false);
                        }
                        None => set_hidden(&document, "burning", true),
                    }
                }
                Scene::Menu { .. } | Scene::GameOver { .. } => {
                    set_hidden(&document, "score", true);
                    set_hidden(&document, "burning", true);
                }
            }

            set_hidden(&document, "fps", !self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&document, "fps", &format!("{} fps", self.fps));
            }
        }

        fn resize(&mut self, css_width: f32, css_height: f32, width: u32, height: u32) {
            self.css_view = Viewport::new(css_width, css_height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute(
                "class",
                if hidden { "overlay hidden" } else { "overlay" },
            );
        }
    }

    fn set_opacity(document: &web_sys::Document, id: &str, alpha: u8) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el
                .style()
                .set_property("opacity", &format!("{:.3}", alpha as f32 / 255.0));
        }
    }

    /// Size the canvas backing store to its CSS box times the pixel ratio
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (client_w as f32, client_h as f32, width, height)
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Burning Tennis starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;
        let performance = window
            .performance()
            .ok_or(StartupError::NoWindow)?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| StartupError::NoCanvas("canvas".into()))?
            .dyn_into()
            .map_err(|_| StartupError::NoCanvas("canvas".into()))?;

        let (css_width, css_height, width, height) = fit_canvas(&window, &canvas);

        let seed = time_seed();
        let mut rng = GameRng::new(seed);
        log::info!("Game seeded with {}", seed);

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::NoAdapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let game = Game::new(PerformanceClock::new(performance), &mut rng);
        let app = Rc::new(RefCell::new(App {
            game,
            rng,
            input: InputState::default(),
            audio,
            settings,
            render_state: Some(render_state),
            css_view: Viewport::new(css_width, css_height),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_keyboard(app.clone());
        setup_touch(&canvas, app.clone());
        setup_focus(app.clone());
        setup_resize(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Burning Tennis running!");
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().input.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    app.borrow_mut().input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// First touch point in game coordinates
    fn touch_position(
        event: &TouchEvent,
        canvas: &HtmlCanvasElement,
        view: &Viewport,
    ) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        let x = touch.client_x() as f32 - rect.left() as f32;
        let y = touch.client_y() as f32 - rect.top() as f32;
        Some(view.pixel_to_game(Vec2::new(x, y)))
    }

    fn setup_touch(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(pos) = touch_position(&event, &canvas_clone, &a.css_view) {
                    a.input.touch_start(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(pos) = touch_position(&event, &canvas_clone, &a.css_view) {
                    a.input.touch_move(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if event.touches().length() == 0 {
                    app.borrow_mut().input.touch_end();
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur: drop held keys, optionally go quiet
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                a.input.release_all();
                if a.settings.mute_on_blur {
                    a.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back: restore the saved mute preference
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                let muted = a.settings.muted;
                a.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_width, css_height, width, height) = fit_canvas(&window, &canvas);
            app.borrow_mut().resize(css_width, css_height, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = app.borrow_mut().frame(time);

        if running {
            request_animation_frame(app);
        } else {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_text(&document, "message", "Thanks for playing!");
                set_hidden(&document, "message", false);
                set_hidden(&document, "score", true);
                set_hidden(&document, "burning", true);
            }
            log::info!("Frame loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless AI-vs-AI match on a synthetic 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use burning_tennis::audio::LogAudio;
    use burning_tennis::platform::time::Stopwatch;
    use burning_tennis::platform::{Clock, ControlScheme, ManualClock, time_seed};
    use burning_tennis::sim::{
        AiController, Command, Game, GameEvent, GameMode, GameRng, Intent, Side, TickInput,
    };
    use burning_tennis::{Scene, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Ten minutes of play; a stalemate rally should not spin forever
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run() {
        log::info!("Burning Tennis (native) starting...");
        log::info!("No window on native builds; playing a headless AI match");

        let settings = Settings::load();
        let seed = time_seed();
        let mut rng = GameRng::new(seed);
        log::info!("Game seeded with {}", rng.seed());

        let wall = Stopwatch::default();
        let mut game = Game::new(ManualClock::default(), &mut rng);
        let mut audio = LogAudio::default();
        // Stands in for the human at the left paddle
        let mut stand_in = AiController::default();
        let mut held = Intent::Stationary;

        game.handle(Command::Start, &mut rng);

        let mut frames = 0;
        while game.mode() == GameMode::Playing && frames < MAX_FRAMES {
            let state = game.state();
            if let Some(intent) = stand_in.update(FRAME_DT, &state.ball, &state.left) {
                held = intent;
            }
            let input = TickInput {
                up: held == Intent::Up,
                down: held == Intent::Down,
                ..TickInput::default()
            };

            game.clock_mut().advance(FRAME_DT);
            for event in game.frame(&input, &mut rng, &mut audio) {
                if let GameEvent::PointScored { scorer, points } = event {
                    let score = &game.state().score;
                    log::info!(
                        "{} +{points}  ({} - {})",
                        side_name(scorer),
                        score.left,
                        score.right
                    );
                }
            }
            frames += 1;
        }

        match game.mode() {
            GameMode::GameOver { winner } => {
                let score = &game.state().score;
                log::info!(
                    "{} wins {} - {} after {:.1}s of play",
                    side_name(winner),
                    score.left,
                    score.right,
                    frames as f32 * FRAME_DT
                );
            }
            mode => log::warn!("Stopped after {frames} frames still in {mode:?}"),
        }
        log::info!(
            "{} sounds triggered, simulated in {:.3}s",
            audio.played(),
            wall.elapsed()
        );

        let scene = Scene::capture(&game, ControlScheme::Keyboard, &settings);
        match serde_json::to_string_pretty(&scene) {
            Ok(json) => log::debug!("Final scene:\n{json}"),
            Err(e) => log::warn!("Could not serialize final scene: {e}"),
        }
    }

    fn side_name(side: Side) -> &'static str {
        match side {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}
