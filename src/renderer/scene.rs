//! Frame composition
//!
//! Turns a `GameState` into one back-to-front triangle list. Layer order:
//! background, grid, safe zones, walls, coins, enemies, player, HUD.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::text::HudFont;
use super::vertex::Vertex;
use crate::config::{GameConfig, Palette};
use crate::consts::{GRID_SPACING, INNER_INSET};
use crate::sim::{GameState, Rect};

/// Safe zone border width
const SAFE_ZONE_BORDER: f32 = 2.0;
/// Width of the shading lines along wall edges
const WALL_EDGE_WIDTH: f32 = 3.0;
/// Death counter position and shadow offset
const HUD_POS: Vec2 = Vec2::new(10.0, 10.0);
const HUD_SHADOW_OFFSET: f32 = 2.0;

/// Build every vertex for the current frame
pub fn build_scene(state: &GameState, config: &GameConfig, font: &HudFont) -> Vec<Vertex> {
    let palette = &config.palette;
    let mut out = Vec::with_capacity(4096);

    background(&mut out, config);
    grid(&mut out, config);
    safe_zones(&mut out, state, palette);
    walls(&mut out, state, palette);
    coins(&mut out, state, palette);
    enemies(&mut out, state, palette);
    player(&mut out, state, palette);
    death_counter(&mut out, state.player.deaths, palette, font);

    out
}

pub fn background(out: &mut Vec<Vertex>, config: &GameConfig) {
    let screen = Rect::new(0.0, 0.0, config.window_width, config.window_height);
    shapes::rect(out, &screen, config.palette.background);
}

/// One-pixel lines every `GRID_SPACING` pixels, starting at 0
pub fn grid(out: &mut Vec<Vertex>, config: &GameConfig) {
    let color = config.palette.grid;

    let mut x = 0.0;
    while x < config.window_width {
        shapes::rect(out, &Rect::new(x, 0.0, 1.0, config.window_height), color);
        x += GRID_SPACING;
    }

    let mut y = 0.0;
    while y < config.window_height {
        shapes::rect(out, &Rect::new(0.0, y, config.window_width, 1.0), color);
        y += GRID_SPACING;
    }
}

pub fn safe_zones(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette) {
    for zone in &state.safe_zones {
        shapes::rect(out, zone, palette.safe_zone);
        shapes::rect_outline(out, zone, SAFE_ZONE_BORDER, palette.safe_zone_border);
    }
}

/// Walls with a lighter line along the top edge and a darker one along the bottom
pub fn walls(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette) {
    for wall in &state.walls {
        let r = &wall.rect;
        shapes::rect(out, r, palette.wall);
        shapes::line(
            out,
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            WALL_EDGE_WIDTH,
            palette.wall_top,
        );
        shapes::line(
            out,
            Vec2::new(r.left(), r.bottom()),
            Vec2::new(r.right(), r.bottom()),
            WALL_EDGE_WIDTH,
            palette.wall_bottom,
        );
    }
}

/// Uncollected coins as two concentric pulsing circles
pub fn coins(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette) {
    for coin in state.coins.iter().filter(|c| !c.collected) {
        // Center and radii snapped to whole pixels
        let half = (coin.size / 2.0).floor();
        let quarter = (coin.size / 4.0).floor();
        let center = coin.pos + Vec2::splat(half);
        let offset = coin.pulse_offset();

        shapes::circle(out, center, half + offset, palette.coin, CIRCLE_SEGMENTS);
        shapes::circle(out, center, quarter + offset, palette.coin_inner, CIRCLE_SEGMENTS);
    }
}

pub fn enemies(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette) {
    for enemy in &state.enemies {
        let r = enemy.rect();
        shapes::rect(out, &r, palette.enemy);
        shapes::rect(out, &r.inset(INNER_INSET), palette.enemy_inner);
    }
}

pub fn player(out: &mut Vec<Vertex>, state: &GameState, palette: &Palette) {
    let r = state.player.rect();
    shapes::rect(out, &r, palette.player);
    shapes::rect(out, &r.inset(INNER_INSET), palette.player_inner);
}

/// Text shown in the corner
pub fn death_label(deaths: u32) -> String {
    format!("Deaths: {deaths}")
}

/// Death counter with a drop shadow (shadow first, main text on top)
pub fn death_counter(out: &mut Vec<Vertex>, deaths: u32, palette: &Palette, font: &HudFont) {
    let label = death_label(deaths);
    let shadow = HUD_POS + Vec2::splat(HUD_SHADOW_OFFSET);
    font.draw_text(out, &label, shadow.x, shadow.y, palette.text_shadow);
    font.draw_text(out, &label, HUD_POS.x, HUD_POS.y, palette.text);
}
