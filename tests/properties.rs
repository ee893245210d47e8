use std::collections::{HashMap, HashSet};

use glam::Vec2;
use proptest::prelude::*;

use thunder_striker::consts::{GAME_HEIGHT, GAME_WIDTH};
use thunder_striker::sim::{EntityId, GameState, TickInput, cleanup, tick};
use thunder_striker::Tuning;

fn target_strategy() -> impl Strategy<Value = Option<Vec2>> {
    prop_oneof![
        1 => Just(None),
        4 => (-200.0f32..800.0, -200.0f32..1000.0).prop_map(|(x, y)| Some(Vec2::new(x, y))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Invariants that must hold between every pair of ticks
    #[test]
    fn prop_tick_invariants(seed in any::<u64>(), targets in prop::collection::vec(target_strategy(), 1..40)) {
        let mut tuning = Tuning::default();
        // Busier skies exercise more collisions
        tuning.spawn_interval_ticks = 15;
        tuning.spawn_interval_min = 8;
        tuning.level_up_score = 300;

        let mut state = GameState::new(seed, &tuning);
        state.reset(&tuning);

        let mut enemy_health: HashMap<EntityId, i32> = HashMap::new();
        let mut retired: HashSet<EntityId> = HashSet::new();
        let mut last_score = state.score;
        let mut last_level = state.level;

        // Each target is held for a few ticks, like a dragging pointer
        for target in targets.iter().flat_map(|t| std::iter::repeat(*t).take(10)) {
            if !state.is_running() {
                break;
            }
            tick(&mut state, &TickInput { target }, &tuning);

            let pos = state.player.body.pos;
            let size = state.player.body.size;
            prop_assert!(pos.x >= 0.0 && pos.x <= GAME_WIDTH - size.x);
            prop_assert!(pos.y >= 0.0 && pos.y <= GAME_HEIGHT - size.y);

            prop_assert!(state.score >= last_score);
            prop_assert!(state.level >= last_level);
            prop_assert!(state.level - last_level <= 1);
            prop_assert!(state.level <= tuning.max_level);
            last_score = state.score;
            last_level = state.level;

            // No dead or spent entity survives a tick
            prop_assert!(state.enemies.iter().all(|e| e.health > 0));
            prop_assert!(state.bullets.iter().all(|b| b.alive));
            prop_assert!(state.particles.iter().all(|p| p.frame < p.frame_limit));

            // Health never goes up, removed ids never come back
            let mut seen = HashSet::new();
            for enemy in &state.enemies {
                prop_assert!(!retired.contains(&enemy.id));
                if let Some(prev) = enemy_health.get(&enemy.id) {
                    prop_assert!(enemy.health <= *prev);
                }
                enemy_health.insert(enemy.id, enemy.health);
                seen.insert(enemy.id);
            }
            let gone: Vec<EntityId> = enemy_health.keys().filter(|id| !seen.contains(id)).copied().collect();
            for id in gone {
                enemy_health.remove(&id);
                retired.insert(id);
            }
        }
    }

    /// Sweeping twice is the same as sweeping once
    #[test]
    fn prop_cleanup_idempotent(seed in any::<u64>(), ticks in 1usize..300) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, &tuning);
        state.reset(&tuning);
        for _ in 0..ticks {
            tick(&mut state, &TickInput { target: Some(Vec2::new(300.0, 700.0)) }, &tuning);
        }

        cleanup(&mut state, &tuning);
        let enemies: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
        let bullets: Vec<_> = state.bullets.iter().map(|b| b.id).collect();
        let particles: Vec<_> = state.particles.iter().map(|p| p.id).collect();

        cleanup(&mut state, &tuning);
        prop_assert_eq!(state.enemies.iter().map(|e| e.id).collect::<Vec<_>>(), enemies);
        prop_assert_eq!(state.bullets.iter().map(|b| b.id).collect::<Vec<_>>(), bullets);
        prop_assert_eq!(state.particles.iter().map(|p| p.id).collect::<Vec<_>>(), particles);
    }
}
