//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Stable iteration order (walls, enemies and coins in layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{blocked_by_walls, enemy_contact_is_lethal, in_safe_zone};
pub use rect::Rect;
pub use state::{Coin, Enemy, GameEvent, GameState, Player, Wall};
pub use tick::{TickInput, tick};
