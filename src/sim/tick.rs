//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame.

use glam::Vec2;

use super::collision::{blocked_by_walls, enemy_contact_is_lethal, touches_uncollected_coin};
use super::state::{GameEvent, GameState};
use crate::config::GameConfig;

/// Directional keys held during a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    /// Per-axis direction in {-1, 0, 1}; diagonals are not normalized
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            self.right as i8 as f32 - self.left as i8 as f32,
            self.down as i8 as f32 - self.up as i8 as f32,
        )
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig) {
    let GameState {
        walls,
        safe_zones,
        player,
        enemies,
        coins,
        frame,
        events,
    } = state;

    events.clear();
    *frame += 1;

    // Player movement: the whole move is rejected if it lands in a wall,
    // even when one axis alone would have been free
    let delta = input.axis() * config.player_speed;
    if !blocked_by_walls(&player.rect_after(delta), walls) {
        player.move_by(delta);
    }

    // Keep player in window bounds
    player.clamp_to(Vec2::new(config.player_max_x(), config.player_max_y()));

    // Each enemy is tested right after it moves, without early exit, so two
    // enemies can both score a death in the same frame
    for (index, enemy) in enemies.iter_mut().enumerate() {
        enemy.advance();
        if enemy_contact_is_lethal(&player.rect(), enemy, safe_zones) {
            player.die();
            events.push(GameEvent::Died {
                enemy: index,
                deaths: player.deaths,
            });
        }
    }

    // Coins
    let player_rect = player.rect();
    for (index, coin) in coins.iter_mut().enumerate() {
        if touches_uncollected_coin(&player_rect, coin) && coin.collect() {
            events.push(GameEvent::CoinCollected { coin: index });
        }
        if !coin.collected {
            coin.pulse_phase += config.coin_pulse_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;

    fn setup() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        (GameState::new(&config), config)
    }

    fn keys(up: bool, down: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_axis_mapping() {
        assert_eq!(TickInput::default().axis(), Vec2::ZERO);
        assert_eq!(keys(true, false, false, true).axis(), Vec2::new(1.0, -1.0));
        // Opposite keys cancel
        assert_eq!(keys(true, true, true, true).axis(), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_moves_full_speed_on_both_axes() {
        let (mut state, config) = setup();
        tick(&mut state, &keys(false, true, false, true), &config);
        assert_eq!(state.player.pos, Vec2::new(105.0, 305.0));
    }

    #[test]
    fn test_wall_collision_reverts_whole_move() {
        let (mut state, config) = setup();
        state.player.pos = Vec2::new(72.0, 300.0);

        tick(&mut state, &keys(false, false, true, false), &config);
        assert_eq!(state.player.pos, Vec2::new(72.0, 300.0));

        // Down alone would be legal, but the combined move hits the wall
        tick(&mut state, &keys(false, true, true, false), &config);
        assert_eq!(state.player.pos, Vec2::new(72.0, 300.0));

        tick(&mut state, &keys(false, true, false, false), &config);
        assert_eq!(state.player.pos, Vec2::new(72.0, 305.0));
    }

    #[test]
    fn test_bounds_clamp() {
        let (mut state, config) = setup();
        state.walls.clear();
        state.enemies.clear();

        state.player.pos = Vec2::new(2.0, 3.0);
        tick(&mut state, &keys(true, false, true, false), &config);
        assert_eq!(state.player.pos, Vec2::ZERO);

        state.player.pos = Vec2::new(768.0, 567.0);
        tick(&mut state, &keys(false, true, false, true), &config);
        assert_eq!(state.player.pos, Vec2::new(770.0, 570.0));
    }

    #[test]
    fn test_enemy_contact_outside_safe_zone_respawns() {
        let (mut state, config) = setup();
        state.player.pos = Vec2::new(395.0, 295.0);

        tick(&mut state, &TickInput::default(), &config);

        assert_eq!(state.player.deaths, 1);
        assert_eq!(state.player.pos, Vec2::new(100.0, 300.0));
        assert_eq!(
            state.events,
            vec![GameEvent::Died {
                enemy: 2,
                deaths: 1
            }]
        );
        // The respawned player is nowhere near the coin under the enemy
        assert!(!state.coins[0].collected);
    }

    #[test]
    fn test_enemy_contact_inside_safe_zone_is_harmless() {
        let (mut state, config) = setup();
        state.enemies[0] = Enemy::new(
            Vec2::new(100.0, 100.0),
            vec![Vec2::new(100.0, 100.0), Vec2::new(100.0, 140.0)],
            config.enemy_size,
            config.enemy_speed,
        );
        state.player.pos = Vec2::new(95.0, 95.0);

        tick(&mut state, &TickInput::default(), &config);

        assert!(state.player.rect().intersects(&state.enemies[0].rect()));
        assert_eq!(state.player.deaths, 0);
        assert_eq!(state.player.pos, Vec2::new(95.0, 95.0));
    }

    #[test]
    fn test_overlapping_enemies_count_once_each() {
        let (mut state, config) = setup();
        let stacked = Enemy::new(
            Vec2::new(105.0, 305.0),
            vec![Vec2::new(105.0, 305.0), Vec2::new(105.0, 345.0)],
            config.enemy_size,
            config.enemy_speed,
        );
        state.enemies = vec![stacked.clone(), stacked];

        tick(&mut state, &TickInput::default(), &config);

        // Respawn point still overlaps the second enemy
        assert_eq!(state.player.deaths, 2);
        assert_eq!(state.events.len(), 2);
    }

    #[test]
    fn test_coin_collected_once() {
        let (mut state, config) = setup();
        state.enemies.clear();
        state.player.pos = Vec2::new(390.0, 290.0);

        tick(&mut state, &TickInput::default(), &config);
        assert!(state.coins[0].collected);
        assert_eq!(state.events, vec![GameEvent::CoinCollected { coin: 0 }]);

        tick(&mut state, &TickInput::default(), &config);
        assert!(state.coins[0].collected);
        assert!(state.events.is_empty());
        assert_eq!(state.coins_collected(), 1);
    }

    #[test]
    fn test_pulse_stops_after_collection() {
        let (mut state, config) = setup();
        state.enemies.clear();

        tick(&mut state, &TickInput::default(), &config);
        let phase = state.coins[0].pulse_phase;
        assert!((phase - config.coin_pulse_speed).abs() < 1e-6);

        state.player.pos = Vec2::new(390.0, 290.0);
        tick(&mut state, &TickInput::default(), &config);
        tick(&mut state, &TickInput::default(), &config);
        assert_eq!(state.coins[0].pulse_phase, phase);
        // Other coins keep animating
        assert!(state.coins[1].pulse_phase > phase);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::default();
        let mut state1 = GameState::new(&config);
        let mut state2 = GameState::new(&config);

        let inputs = [
            keys(false, false, false, true),
            keys(false, true, false, true),
            keys(true, false, false, false),
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, &config);
                tick(&mut state2, input, &config);
            }
        }

        assert_eq!(state1.frame, 200);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.deaths, state2.player.deaths);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.path_index, b.path_index);
        }
    }
}
