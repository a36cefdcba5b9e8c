//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard state (four directional keys)
//! - Frame pacing (fixed 60 Hz governor)
//! - Frame statistics
//! - The native window host (`native`, winit)
//!
//! The web host lives in `main.rs` and drives the same pieces from
//! `requestAnimationFrame`.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

use crate::config::GameConfig;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// The four keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionKey {
    Up,
    Down,
    Left,
    Right,
}

impl DirectionKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_web_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Pressed/released state of the directional keys, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    input: TickInput,
}

impl KeyState {
    pub fn set(&mut self, key: DirectionKey, pressed: bool) {
        match key {
            DirectionKey::Up => self.input.up = pressed,
            DirectionKey::Down => self.input.down = pressed,
            DirectionKey::Left => self.input.left = pressed,
            DirectionKey::Right => self.input.right = pressed,
        }
    }

    /// Release everything (focus lost: key-up events will never arrive)
    pub fn clear(&mut self) {
        self.input = TickInput::default();
    }

    /// Snapshot for the next tick
    pub fn input(&self) -> TickInput {
        self.input
    }
}

/// Fixed-interval frame governor.
///
/// Times are seconds on any monotonic clock. At most one frame is reported
/// per interval; after a stall longer than one interval the schedule
/// restarts from the current time instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: f64,
    next_deadline: f64,
}

impl FramePacer {
    pub fn new(fps: u32, start: f64) -> Self {
        Self {
            interval: 1.0 / fps.max(1) as f64,
            next_deadline: start,
        }
    }

    /// Seconds per frame
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// When the next frame is due
    pub fn next_deadline(&self) -> f64 {
        self.next_deadline
    }

    /// Returns true if a frame is due at `now`, and schedules the next one
    pub fn poll(&mut self, now: f64) -> bool {
        if now < self.next_deadline {
            return false;
        }
        self.next_deadline += self.interval;
        if now - self.next_deadline >= self.interval {
            self.next_deadline = now + self.interval;
        }
        true
    }
}

/// Rolling frame rate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; 60],
    frame_index: usize,
    frames: u64,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    /// Record a presented frame at `time` (seconds)
    pub fn record(&mut self, time: f64) {
        // Oldest entry is about to be overwritten; measure the window it spans
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        self.frames += 1;

        if self.frames > self.frame_times.len() as u64 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
            }
        }

        if self.frames % self.frame_times.len() as u64 == 0 {
            log::debug!("{} frames presented, {} fps", self.frames, self.fps);
        }
    }

    /// Measured frames per second (0 until the window has filled)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Run one simulation frame from the current key state and log what happened
pub fn step(state: &mut GameState, keys: &KeyState, config: &GameConfig) {
    tick(state, &keys.input(), config);

    for event in &state.events {
        match *event {
            GameEvent::Died { enemy, deaths } => {
                log::info!("Caught by enemy {} (deaths: {})", enemy, deaths);
            }
            GameEvent::CoinCollected { coin } => {
                log::info!(
                    "Coin {} collected ({}/{})",
                    coin,
                    state.coins_collected(),
                    state.coins.len()
                );
            }
        }
    }
}

/// Fatal host errors. Initialization failures end the process.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop
    #[cfg(not(target_arch = "wasm32"))]
    EventLoopCreation(winit::error::EventLoopError),
    /// Event loop ended abnormally
    #[cfg(not(target_arch = "wasm32"))]
    EventLoopExecution(winit::error::EventLoopError),
    /// The OS refused to open the window
    #[cfg(not(target_arch = "wasm32"))]
    WindowCreation(winit::error::OsError),
    /// No drawable surface for the window/canvas
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No GPU adapter compatible with the surface
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused to create a device
    DeviceRequest(wgpu::RequestDeviceError),
    /// The embedded HUD font could not be parsed
    FontLoad(&'static str),
    /// Presenting failed for lack of memory
    OutOfMemory,
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            #[cfg(not(target_arch = "wasm32"))]
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            #[cfg(not(target_arch = "wasm32"))]
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::SurfaceCreation(e) => write!(f, "Surface creation failed: {}", e),
            Self::AdapterRequest(e) => write!(f, "No suitable GPU adapter: {}", e),
            Self::DeviceRequest(e) => write!(f, "GPU device request failed: {}", e),
            Self::FontLoad(e) => write!(f, "Font loading failed: {}", e),
            Self::OutOfMemory => write!(f, "GPU out of memory"),
        }
    }
}

impl std::error::Error for PlatformError {}
