//! Game configuration
//!
//! Built once at startup from `consts` and passed by reference to the
//! simulation and renderer. Nothing reads it from disk; it is serializable
//! only so the host can dump it to the log.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::rgb;

/// Colors for every drawn element (linear RGBA)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [f32; 4],
    pub grid: [f32; 4],
    pub safe_zone: [f32; 4],
    pub safe_zone_border: [f32; 4],
    pub wall: [f32; 4],
    /// Highlight along the top edge of each wall
    pub wall_top: [f32; 4],
    /// Shadow along the bottom edge of each wall
    pub wall_bottom: [f32; 4],
    pub coin: [f32; 4],
    pub coin_inner: [f32; 4],
    pub enemy: [f32; 4],
    pub enemy_inner: [f32; 4],
    pub player: [f32; 4],
    pub player_inner: [f32; 4],
    pub text: [f32; 4],
    pub text_shadow: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(240, 240, 240),
            grid: rgb(230, 230, 230),
            safe_zone: rgb(200, 255, 200),
            safe_zone_border: rgb(150, 200, 150),
            wall: rgb(100, 100, 100),
            wall_top: rgb(120, 120, 120),
            wall_bottom: rgb(80, 80, 80),
            coin: rgb(255, 255, 0),
            coin_inner: rgb(200, 200, 0),
            enemy: rgb(0, 0, 255),
            enemy_inner: rgb(100, 100, 255),
            player: rgb(255, 0, 0),
            player_inner: rgb(255, 100, 100),
            text: rgb(0, 0, 0),
            text_shadow: rgb(50, 50, 50),
        }
    }
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,
    pub window_title: String,
    /// Frames (and simulation steps) per second
    pub target_fps: u32,

    // === Entities ===
    pub player_size: f32,
    pub enemy_size: f32,
    pub coin_size: f32,
    /// Player displacement per frame on each pressed axis
    pub player_speed: f32,
    /// Enemy displacement per frame along its path
    pub enemy_speed: f32,
    /// Coin pulse phase advance per frame
    pub coin_pulse_speed: f32,

    // === Rendering ===
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),
            target_fps: TARGET_FPS,

            player_size: PLAYER_SIZE,
            enemy_size: ENEMY_SIZE,
            coin_size: COIN_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_speed: ENEMY_SPEED,
            coin_pulse_speed: COIN_PULSE_SPEED,

            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Duration of one frame in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Largest x the player's top-left corner may take
    pub fn player_max_x(&self) -> f32 {
        self.window_width - self.player_size
    }

    /// Largest y the player's top-left corner may take
    pub fn player_max_y(&self) -> f32 {
        self.window_height - self.player_size
    }

    /// Serialize for the startup log line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let config = GameConfig::default();
        assert_eq!(config.window_width, 800.0);
        assert_eq!(config.window_height, 600.0);
        assert_eq!(config.player_max_x(), 770.0);
        assert_eq!(config.player_max_y(), 570.0);
        assert!((config.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_palette_endpoints() {
        let palette = Palette::default();
        assert_eq!(palette.text, [0.0, 0.0, 0.0, 1.0]);
        assert!((palette.player[0] - 1.0).abs() < 1e-5);
        assert_eq!(palette.player[1], 0.0);
        // sRGB 240 is about 0.87 linear
        assert!((palette.background[0] - 0.871).abs() < 0.01);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"player_speed": 7.0}"#).unwrap();
        assert_eq!(config.player_speed, 7.0);
        assert_eq!(config.enemy_speed, ENEMY_SPEED);
        assert_eq!(config.window_title, WINDOW_TITLE);
    }
}
