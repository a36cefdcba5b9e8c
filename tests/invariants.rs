//! Whole-game invariants under arbitrary key sequences

use glam::Vec2;
use proptest::prelude::*;

use hardest_square::GameConfig;
use hardest_square::sim::{GameState, TickInput, blocked_by_walls, tick};

fn any_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| TickInput {
            up,
            down,
            left,
            right,
        },
    )
}

/// Inputs held for a few frames each, so the player actually travels
fn held_inputs() -> impl Strategy<Value = Vec<TickInput>> {
    prop::collection::vec((any_input(), 1usize..30), 1..40).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(input, frames)| std::iter::repeat_n(input, frames))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_stays_in_bounds(inputs in held_inputs()) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        for input in &inputs {
            tick(&mut state, input, &config);
            let pos = state.player.pos;
            prop_assert!(pos.x >= 0.0 && pos.x <= 770.0);
            prop_assert!(pos.y >= 0.0 && pos.y <= 570.0);
        }
    }

    #[test]
    fn player_never_overlaps_walls(inputs in held_inputs()) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        for input in &inputs {
            tick(&mut state, input, &config);
            prop_assert!(!blocked_by_walls(&state.player.rect(), &state.walls));
        }
    }

    #[test]
    fn blocked_move_leaves_position_unchanged(inputs in held_inputs()) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        for input in &inputs {
            let before = state.player.pos;
            let deaths = state.player.deaths;
            let proposed = state.player.rect_after(input.axis() * config.player_speed);
            let blocked = blocked_by_walls(&proposed, &state.walls);

            tick(&mut state, input, &config);

            if blocked && state.player.deaths == deaths {
                prop_assert_eq!(state.player.pos, before);
            }
        }
    }

    #[test]
    fn deaths_and_coins_are_monotone(inputs in held_inputs()) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        let mut deaths = 0;
        let mut collected = vec![false; state.coins.len()];
        for input in &inputs {
            tick(&mut state, input, &config);
            prop_assert!(state.player.deaths >= deaths);
            deaths = state.player.deaths;
            for (was, coin) in collected.iter_mut().zip(&state.coins) {
                prop_assert!(!*was || coin.collected);
                *was = coin.collected;
            }
        }
    }

    #[test]
    fn enemies_close_in_on_their_target(frames in 1usize..400) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        for _ in 0..frames {
            let before: Vec<(usize, f32)> = state
                .enemies
                .iter()
                .map(|e| (e.path_index, e.pos.distance(e.path[e.path_index])))
                .collect();

            tick(&mut state, &TickInput::default(), &config);

            for (enemy, (index, distance)) in state.enemies.iter().zip(before) {
                if enemy.path_index == index {
                    let now = enemy.pos.distance(enemy.path[index]);
                    prop_assert!((distance - now - enemy.speed).abs() < 1e-3);
                } else {
                    // Waypoint switch: no movement that frame
                    prop_assert!(distance < enemy.speed);
                }
            }
        }
    }
}

#[test]
fn respawn_scenario() {
    let config = GameConfig::default();
    let mut state = GameState::new(&config);
    state.player.pos = Vec2::new(395.0, 295.0);

    tick(&mut state, &TickInput::default(), &config);

    assert_eq!(state.player.deaths, 1);
    assert_eq!(state.player.pos, Vec2::new(100.0, 300.0));
}

#[test]
fn idle_player_survives_a_minute() {
    let config = GameConfig::default();
    let mut state = GameState::new(&config);
    for _ in 0..60 * 60 {
        tick(&mut state, &TickInput::default(), &config);
    }
    // No enemy path crosses the spawn point
    assert_eq!(state.player.deaths, 0);
    assert_eq!(state.frame, 3600);
}
