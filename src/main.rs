//! Hardest Square entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use hardest_square::GameConfig;
    use hardest_square::consts::MAX_SUBSTEPS;
    use hardest_square::platform::{DirectionKey, FrameStats, KeyState, PlatformError, step};
    use hardest_square::renderer::{HudFont, RenderState, build_scene};
    use hardest_square::sim::GameState;

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        state: GameState,
        render_state: Option<RenderState>,
        font: HudFont,
        accumulator: f32,
        last_time: f64,
        keys: KeyState,
        stats: FrameStats,
    }

    impl Game {
        fn new(config: GameConfig, font: HudFont) -> Self {
            let state = GameState::new(&config);
            Self {
                config,
                state,
                render_state: None,
                font,
                accumulator: 0.0,
                last_time: 0.0,
                keys: KeyState::default(),
                stats: FrameStats::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let frame_dt = self.config.frame_dt();
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= frame_dt && substeps < MAX_SUBSTEPS {
                step(&mut self.state, &self.keys, &self.config);
                self.accumulator -= frame_dt;
                substeps += 1;
            }
            // Drop what could not be caught up rather than replaying it later
            self.accumulator = self.accumulator.min(frame_dt);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.config, &self.font);
                match render_state.render(&vertices) {
                    Ok(_) => self.stats.record(time / 1000.0),
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("{}", PlatformError::OutOfMemory);
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let config = GameConfig::default();
        log::info!("Hardest Square starting...");
        if let Ok(json) = config.to_json() {
            log::debug!("Config: {}", json);
        }

        if let Err(e) = start(config).await {
            log::error!("{}", e);
        }
    }

    async fn start(config: GameConfig) -> Result<(), PlatformError> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical size, scaled for the display's pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (config.window_width as f64 * dpr) as u32;
        let height = (config.window_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        document.set_title(&config.window_title);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(PlatformError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(PlatformError::AdapterRequest)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (config.window_width, config.window_height),
            config.palette.background,
        )
        .await
        .map_err(PlatformError::DeviceRequest)?;

        let font = HudFont::load().map_err(PlatformError::FontLoad)?;

        let game = Rc::new(RefCell::new(Game::new(config, font)));
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hardest Square running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down / key up
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = DirectionKey::from_web_key(&event.key()) {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().keys.set(key, pressed);
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
                g.config.frame_dt()
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
        }

        // Yield to the browser until the next animation frame
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
    use hardest_square::GameConfig;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hardest Square (native) starting...");

    let config = GameConfig::default();
    match config.to_json() {
        Ok(json) => log::debug!("Config: {}", json),
        Err(e) => log::warn!("Could not serialize config: {}", e),
    }

    if let Err(e) = hardest_square::platform::native::run(config) {
        log::error!("Fatal: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
