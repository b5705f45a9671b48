//! Enemy spawning
//!
//! Each spawn tick creates a batch of enemies just outside one of the four
//! screen edges. Batch size ramps linearly with time survived.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};
use crate::tuning::Tuning;

/// Enemies created per spawn tick after `elapsed_secs` seconds
pub fn spawn_count(tuning: &Tuning, elapsed_secs: u32) -> u32 {
    let ramp = (elapsed_secs / 60).saturating_mul(tuning.spawn_increase_rate);
    tuning.base_spawn_count.saturating_add(ramp)
}

/// Pick a spawn point just outside a uniformly chosen screen edge
pub fn spawn_position<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    let w = tuning.world_width.max(0.0) as u32;
    let h = tuning.world_height.max(0.0) as u32;
    let margin = tuning.spawn_margin;

    match rng.random_range(0..4) {
        0 => Vec2::new(-margin, rng.random_range(0..=h) as f32),
        1 => Vec2::new(tuning.world_width + margin, rng.random_range(0..=h) as f32),
        2 => Vec2::new(rng.random_range(0..=w) as f32, -margin),
        _ => Vec2::new(rng.random_range(0..=w) as f32, tuning.world_height + margin),
    }
}

/// Run one spawn tick. Returns how many enemies were created.
pub fn spawn_enemies(state: &mut GameState) -> u32 {
    let mut count = spawn_count(&state.tuning, state.elapsed_secs);
    if let Some(cap) = state.tuning.max_enemies {
        let room = cap.saturating_sub(state.enemies.len()) as u32;
        count = count.min(room);
    }

    for _ in 0..count {
        let pos = spawn_position(&mut state.rng, &state.tuning);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos, &state.tuning));
        state.events.push(GameEvent::EnemySpawned { id, pos });
    }

    if count > 0 {
        log::debug!(
            "Spawned {} enemies at {}s ({} alive)",
            count,
            state.elapsed_secs,
            state.enemies.len()
        );
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_count_examples() {
        let tuning = Tuning::default();
        assert_eq!(spawn_count(&tuning, 0), 1);
        assert_eq!(spawn_count(&tuning, 59), 1);
        assert_eq!(spawn_count(&tuning, 65), 2);
        assert_eq!(spawn_count(&tuning, 130), 3);
    }

    #[test]
    fn test_spawn_positions_on_edges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut edges = [0u32; 4];

        for _ in 0..400 {
            let p = spawn_position(&mut rng, &tuning);
            if p.x == -50.0 {
                assert!((0.0..=600.0).contains(&p.y));
                edges[0] += 1;
            } else if p.x == 850.0 {
                assert!((0.0..=600.0).contains(&p.y));
                edges[1] += 1;
            } else if p.y == -50.0 {
                assert!((0.0..=800.0).contains(&p.x));
                edges[2] += 1;
            } else if p.y == 650.0 {
                assert!((0.0..=800.0).contains(&p.x));
                edges[3] += 1;
            } else {
                panic!("spawn point {p:?} is not on an edge");
            }
        }
        // Every edge gets used
        assert!(edges.iter().all(|&n| n > 0), "{edges:?}");
    }

    #[test]
    fn test_spawn_enemies_appends_in_order() {
        let mut state = GameState::new(7, Tuning::default());
        state.elapsed_secs = 125;
        assert_eq!(spawn_enemies(&mut state), 3);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.enemies.windows(2).all(|w| w[0].id < w[1].id));
        assert!(state.enemies.iter().all(|e| e.life == 50 && e.max_life == 50));
        let spawned = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_spawn_respects_optional_cap() {
        let tuning = Tuning {
            max_enemies: Some(4),
            ..Tuning::default()
        };
        let mut state = GameState::new(7, tuning);
        state.elapsed_secs = 600;
        assert_eq!(spawn_enemies(&mut state), 4);
        assert_eq!(spawn_enemies(&mut state), 0);
        assert_eq!(state.enemies.len(), 4);
    }

    #[test]
    fn test_spawn_count_saturates() {
        let tuning = Tuning {
            base_spawn_count: u32::MAX - 1,
            spawn_increase_rate: u32::MAX,
            ..Tuning::default()
        };
        assert_eq!(spawn_count(&tuning, 120), u32::MAX);
        assert_eq!(spawn_count(&tuning, u32::MAX), u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_spawn_count_formula(t in 0u32..100_000, base in 0u32..10, rate in 0u32..10) {
            let tuning = Tuning { base_spawn_count: base, spawn_increase_rate: rate, ..Tuning::default() };
            prop_assert_eq!(spawn_count(&tuning, t), base + (t / 60) * rate);
        }
    }
}
