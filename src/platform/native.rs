//! Native window host
//!
//! Runs the game inside a winit event loop. The loop sleeps until the next
//! frame deadline (`ControlFlow::WaitUntil`), ticks once, then redraws.
//! Closing the window is the only way out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use super::{DirectionKey, FramePacer, FrameStats, KeyState, PlatformError, step};
use crate::config::GameConfig;
use crate::renderer::{HudFont, RenderState, build_scene};
use crate::sim::GameState;

/// Map a physical key to one of the game's directions
pub fn direction_for(code: KeyCode) -> Option<DirectionKey> {
    match code {
        KeyCode::ArrowUp => Some(DirectionKey::Up),
        KeyCode::ArrowDown => Some(DirectionKey::Down),
        KeyCode::ArrowLeft => Some(DirectionKey::Left),
        KeyCode::ArrowRight => Some(DirectionKey::Right),
        _ => None,
    }
}

/// What the host does in response to a window event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Exit,
    Key(DirectionKey, bool),
    /// Key releases are lost while unfocused
    ClearKeys,
    Resize(u32, u32),
    Redraw,
    Ignore,
}

/// Action for a key press or release
pub fn key_action(key: PhysicalKey, state: ElementState) -> HostAction {
    match key {
        PhysicalKey::Code(code) => match direction_for(code) {
            Some(dir) => HostAction::Key(dir, state == ElementState::Pressed),
            None => HostAction::Ignore,
        },
        PhysicalKey::Unidentified(_) => HostAction::Ignore,
    }
}

pub fn host_action(event: &WindowEvent) -> HostAction {
    match event {
        WindowEvent::CloseRequested => HostAction::Exit,
        WindowEvent::KeyboardInput { event, .. } => key_action(event.physical_key, event.state),
        WindowEvent::Focused(false) => HostAction::ClearKeys,
        WindowEvent::Resized(size) => HostAction::Resize(size.width, size.height),
        WindowEvent::RedrawRequested => HostAction::Redraw,
        _ => HostAction::Ignore,
    }
}

/// Window, GPU and game state for the native build
pub struct App {
    config: GameConfig,
    state: GameState,
    keys: KeyState,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    font: Option<HudFont>,
    pacer: FramePacer,
    stats: FrameStats,
    start: Instant,
    /// Set on the first close request; no tick runs after it
    exit_requested: bool,
    /// First fatal error; returned from `run` once the loop has exited
    error: Option<PlatformError>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        let pacer = FramePacer::new(config.target_fps, 0.0);
        Self {
            config,
            state,
            keys: KeyState::default(),
            window: None,
            render_state: None,
            font: None,
            pacer,
            stats: FrameStats::default(),
            start: Instant::now(),
            exit_requested: false,
            error: None,
        }
    }

    /// Seconds since the app was created
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        self.exit_requested = true;
        event_loop.exit();
    }

    /// Stop ticking and log a summary of the session
    fn request_exit(&mut self) {
        if self.exit_requested {
            return;
        }
        self.exit_requested = true;
        log::info!(
            "Window close requested after {} frames at {} fps ({} deaths, {}/{} coins)",
            self.state.frame,
            self.stats.fps(),
            self.state.player.deaths,
            self.state.coins_collected(),
            self.state.coins.len()
        );
    }

    /// Tick once if a frame is due at `now`. Returns whether the game advanced.
    fn advance(&mut self, now: f64) -> bool {
        if self.exit_requested || !self.pacer.poll(now) {
            return false;
        }
        step(&mut self.state, &self.keys, &self.config);
        true
    }

    /// Create the window and the GPU state behind it
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(PlatformError::WindowCreation)?,
        );
        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(PlatformError::SurfaceCreation)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(PlatformError::AdapterRequest)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let font = HudFont::load().map_err(PlatformError::FontLoad)?;

        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width,
            size.height,
            (self.config.window_width, self.config.window_height),
            self.config.palette.background,
        ))
        .map_err(PlatformError::DeviceRequest)?;

        window.request_redraw();
        self.window = Some(window);
        self.render_state = Some(render_state);
        self.font = Some(font);
        Ok(())
    }

    /// Render the current frame
    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(render_state), Some(font)) = (self.render_state.as_mut(), self.font.as_ref())
        else {
            return;
        };

        let vertices = build_scene(&self.state, &self.config, font);
        match render_state.render(&vertices) {
            Ok(()) => {
                let now = self.now();
                self.stats.record(now);
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, PlatformError::OutOfMemory);
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match host_action(&event) {
            HostAction::Exit => {
                self.request_exit();
                event_loop.exit();
            }
            HostAction::Key(key, pressed) => self.keys.set(key, pressed),
            HostAction::ClearKeys => self.keys.clear(),
            HostAction::Resize(width, height) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(width, height);
                }
            }
            HostAction::Redraw => self.render(event_loop),
            HostAction::Ignore => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() || self.exit_requested || event_loop.exiting() {
            return;
        }

        let now = self.now();
        if self.advance(now) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        let deadline = self.start + Duration::from_secs_f64(self.pacer.next_deadline());
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }
}

/// Open the window and run until it is closed
pub fn run(config: GameConfig) -> Result<(), PlatformError> {
    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    let mut app = App::new(config);

    event_loop
        .run_app(&mut app)
        .map_err(PlatformError::EventLoopExecution)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            log::info!(
                "Exiting after {} presented frames ({} fps)",
                app.stats.frames(),
                app.stats.fps()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(direction_for(KeyCode::ArrowUp), Some(DirectionKey::Up));
        assert_eq!(direction_for(KeyCode::ArrowDown), Some(DirectionKey::Down));
        assert_eq!(direction_for(KeyCode::ArrowLeft), Some(DirectionKey::Left));
        assert_eq!(direction_for(KeyCode::ArrowRight), Some(DirectionKey::Right));
        assert_eq!(direction_for(KeyCode::KeyW), None);
    }

    #[test]
    fn test_key_events_map_to_actions() {
        let right = PhysicalKey::Code(KeyCode::ArrowRight);
        assert_eq!(
            key_action(right, ElementState::Pressed),
            HostAction::Key(DirectionKey::Right, true)
        );
        assert_eq!(
            key_action(right, ElementState::Released),
            HostAction::Key(DirectionKey::Right, false)
        );
        assert_eq!(
            key_action(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed),
            HostAction::Ignore
        );
    }

    #[test]
    fn test_window_events_map_to_actions() {
        assert_eq!(host_action(&WindowEvent::CloseRequested), HostAction::Exit);
        assert_eq!(host_action(&WindowEvent::Focused(false)), HostAction::ClearKeys);
        assert_eq!(host_action(&WindowEvent::Focused(true)), HostAction::Ignore);
        assert_eq!(host_action(&WindowEvent::RedrawRequested), HostAction::Redraw);
        assert_eq!(
            host_action(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
            HostAction::Resize(800, 600)
        );
    }

    #[test]
    fn test_no_tick_after_close() {
        let mut app = App::new(GameConfig::default());
        assert!(app.advance(0.0));
        assert_eq!(app.state.frame, 1);

        app.request_exit();
        let next = app.pacer.next_deadline();
        assert!(!app.advance(next));
        assert!(!app.advance(next + 1.0));
        assert_eq!(app.state.frame, 1);
    }

    #[test]
    fn test_new_app_has_no_window() {
        let app = App::new(GameConfig::default());
        assert!(app.window.is_none());
        assert!(app.font.is_none());
        assert!(app.error.is_none());
        assert!(!app.exit_requested);
        assert_eq!(app.state.frame, 0);
    }
}
