//! The classic level layout
//!
//! A hollow rectangle of walls, a safe zone in two opposite corners, three
//! patrolling enemies and three coins.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Coin, Enemy, Wall};
use crate::config::GameConfig;
use crate::consts::{PLAYER_START_X, PLAYER_START_Y};

/// Arena walls: top, bottom, left, right
pub fn walls() -> Vec<Wall> {
    vec![
        Wall::new(50.0, 50.0, 700.0, 20.0),
        Wall::new(50.0, 530.0, 700.0, 20.0),
        Wall::new(50.0, 50.0, 20.0, 500.0),
        Wall::new(730.0, 50.0, 20.0, 500.0),
    ]
}

/// Start zone (top-left corner) and end zone (bottom-right corner)
pub fn safe_zones() -> Vec<Rect> {
    vec![
        Rect::new(70.0, 70.0, 100.0, 100.0),
        Rect::new(630.0, 430.0, 100.0, 100.0),
    ]
}

pub fn player_start() -> Vec2 {
    Vec2::new(PLAYER_START_X, PLAYER_START_Y)
}

/// Two vertical patrols in opposite phase plus a long central sweep
pub fn enemies(config: &GameConfig) -> Vec<Enemy> {
    let enemy = |x: f32, y: f32, path: &[(f32, f32)]| {
        Enemy::new(
            Vec2::new(x, y),
            path.iter().map(|&(px, py)| Vec2::new(px, py)).collect(),
            config.enemy_size,
            config.enemy_speed,
        )
    };

    vec![
        enemy(300.0, 200.0, &[(300.0, 200.0), (300.0, 400.0)]),
        enemy(500.0, 400.0, &[(500.0, 400.0), (500.0, 200.0)]),
        enemy(
            400.0,
            300.0,
            &[(400.0, 300.0), (400.0, 100.0), (400.0, 500.0), (400.0, 300.0)],
        ),
    ]
}

pub fn coins(config: &GameConfig) -> Vec<Coin> {
    [(400.0, 300.0), (600.0, 300.0), (300.0, 200.0)]
        .into_iter()
        .map(|(x, y)| Coin::new(Vec2::new(x, y), config.coin_size))
        .collect()
}
