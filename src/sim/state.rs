//! Game state and core simulation types
//!
//! Every entity is created once at startup and lives for the whole run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::COIN_PULSE_AMPLITUDE;
use crate::direction_to;

/// A static arena wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Respawn point
    pub start: Vec2,
    /// Number of deaths so far (never decreases)
    pub deaths: u32,
}

impl Player {
    pub fn new(start: Vec2, size: f32) -> Self {
        Self {
            pos: start,
            size,
            start,
            deaths: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Bounding box the player would occupy after moving by `delta`
    pub fn rect_after(&self, delta: Vec2) -> Rect {
        Rect::square(self.pos + delta, self.size)
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Clamp each axis independently to `[0, max]`
    pub fn clamp_to(&mut self, max: Vec2) {
        self.pos = self.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
    }

    /// Count a death and send the player back to the start
    pub fn die(&mut self) {
        self.deaths += 1;
        self.reset_position();
    }

    pub fn reset_position(&mut self) {
        self.pos = self.start;
    }
}

/// A patrolling enemy following a closed waypoint path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Waypoints, traversed cyclically
    pub path: Vec<Vec2>,
    /// Index of the waypoint currently being approached
    pub path_index: usize,
    /// Distance covered per frame
    pub speed: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, path: Vec<Vec2>, size: f32, speed: f32) -> Self {
        Self {
            pos,
            size,
            path,
            path_index: 0,
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Waypoint currently being approached (None for an empty path)
    pub fn target(&self) -> Option<Vec2> {
        self.path.get(self.path_index).copied()
    }

    /// Advance one frame along the path.
    ///
    /// When the target is closer than one step the enemy stays put and only
    /// switches to the next waypoint; the remainder of that step is dropped.
    pub fn advance(&mut self) {
        let Some(target) = self.target() else {
            return;
        };

        let distance = self.pos.distance(target);
        if distance < self.speed {
            self.path_index = (self.path_index + 1) % self.path.len();
        } else if let Some(dir) = direction_to(self.pos, target) {
            self.pos += dir * self.speed;
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Once set, never cleared
    pub collected: bool,
    /// Pulse animation phase (radians, visual only)
    pub pulse_phase: f32,
}

impl Coin {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            collected: false,
            pulse_phase: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Mark as collected; returns true only on the first call
    pub fn collect(&mut self) -> bool {
        let first = !self.collected;
        self.collected = true;
        first
    }

    /// Current radius offset of the pulse animation
    pub fn pulse_offset(&self) -> f32 {
        self.pulse_phase.sin() * COIN_PULSE_AMPLITUDE
    }
}

/// Something noteworthy that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player touched an enemy outside the safe zones
    Died { enemy: usize, deaths: u32 },
    /// Player picked up a coin
    CoinCollected { coin: usize },
}

/// Complete game state (deterministic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena bounds
    pub walls: Vec<Wall>,
    /// Regions where enemy contact is harmless
    pub safe_zones: Vec<Rect>,
    pub player: Player,
    /// Enemies in update order
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Frames simulated so far
    pub frame: u64,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create the classic level
    pub fn new(config: &GameConfig) -> Self {
        Self {
            walls: level::walls(),
            safe_zones: level::safe_zones(),
            player: Player::new(level::player_start(), config.player_size),
            enemies: level::enemies(config),
            coins: level::coins(config),
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Number of coins picked up so far
    pub fn coins_collected(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }
}
