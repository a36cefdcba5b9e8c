//! Hardest Square - a single-screen dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Input state, frame pacing and the native window host
//! - `config`: Immutable game configuration built once at startup

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, Palette};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; the simulation advances one step per frame
    pub const TARGET_FPS: u32 = 60;
    /// Maximum catch-up steps per animation frame on the web host
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const WINDOW_TITLE: &str = "World's Hardest Game";

    /// Entity sizes (bounding squares)
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const COIN_SIZE: f32 = 15.0;

    /// Speeds in pixels per frame
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const ENEMY_SPEED: f32 = 4.0;

    /// Coin pulse phase advance per frame (radians)
    pub const COIN_PULSE_SPEED: f32 = 0.1;
    /// Coin pulse amplitude in pixels
    pub const COIN_PULSE_AMPLITUDE: f32 = 2.0;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = WINDOW_HEIGHT / 2.0;

    /// Background grid spacing
    pub const GRID_SPACING: f32 = 40.0;
    /// Inset of the lighter inner square drawn on players and enemies
    pub const INNER_INSET: f32 = 3.0;
}

/// Unit vector pointing from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Convert an 8-bit sRGB color to the linear RGBA used by the renderer
#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    fn to_linear(c: u8) -> f32 {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    [to_linear(r), to_linear(g), to_linear(b), 1.0]
}
