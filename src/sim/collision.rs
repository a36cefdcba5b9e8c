//! Contact tests between the player and the rest of the level
//!
//! All of them reduce to bounding-box overlap; the only policy lives in
//! `blocked_by_walls` (whole-move revert) and `in_safe_zone`.

use super::rect::Rect;
use super::state::{Coin, Enemy, Wall};

/// Whether a proposed player box overlaps any wall
pub fn blocked_by_walls(proposed: &Rect, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| proposed.intersects(&wall.rect))
}

/// Whether the player box touches any safe zone (partial overlap counts)
pub fn in_safe_zone(player: &Rect, safe_zones: &[Rect]) -> bool {
    safe_zones.iter().any(|zone| player.intersects(zone))
}

/// Whether an enemy hit on this box is lethal
pub fn enemy_contact_is_lethal(player: &Rect, enemy: &Enemy, safe_zones: &[Rect]) -> bool {
    player.intersects(&enemy.rect()) && !in_safe_zone(player, safe_zones)
}

/// Whether the player can pick up this coin now
pub fn touches_uncollected_coin(player: &Rect, coin: &Coin) -> bool {
    !coin.collected && player.intersects(&coin.rect())
}
