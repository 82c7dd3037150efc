use glam::Vec2;
use proptest::prelude::*;

use shell_game::Settings;
use shell_game::consts::*;
use shell_game::sim::{
    ArcPath, Container, ContainerId, GameEvent, GamePhase, GameState, PointerEvent, Registry,
    TickInput, tick,
};

/// Positions on a half-unit grid so distinct columns are never nearly equal
fn grid_point() -> impl Strategy<Value = Vec2> {
    (-20i32..=20, -20i32..=20).prop_map(|(x, y)| Vec2::new(x as f32 * 0.5, y as f32 * 0.5))
}

fn settle(registry: &mut Registry) {
    for _ in 0..100_000 {
        if !registry.iter().any(Container::is_moving) {
            return;
        }
        registry.integrate_motion(SIM_DT);
    }
    panic!("containers never settled");
}

proptest! {
    #[test]
    fn arc_point_is_always_finite(
        start in grid_point(),
        target in grid_point(),
        height in -MAX_ARC_HEIGHT..=MAX_ARC_HEIGHT,
        f in 0.0f32..=1.0,
    ) {
        let path = ArcPath::new(start, target, height);
        let x = start.x + (target.x - start.x) * f;
        let p = path.point_at(x);
        prop_assert!(p.is_finite());
        prop_assert_eq!(p.x, x);
        if start.x == target.x {
            prop_assert_eq!(p.y, start.y);
        }
    }

    #[test]
    fn swapping_twice_restores_positions(
        a in grid_point(),
        b in grid_point(),
        speed in MIN_MOVE_SPEED..=MAX_MOVE_SPEED,
        height in -MAX_ARC_HEIGHT..=MAX_ARC_HEIGHT,
    ) {
        // Same column at different heights never lands
        prop_assume!(a.x != b.x || a.y == b.y);

        let mut registry = Registry::new(vec![
            Container::new(ContainerId(0), a, speed, height),
            Container::new(ContainerId(1), b, speed, height),
        ]).unwrap();

        prop_assert!(registry.swap(ContainerId(0), ContainerId(1)));
        settle(&mut registry);
        prop_assert_eq!(registry.get(ContainerId(0)).unwrap().pos, b);
        prop_assert_eq!(registry.get(ContainerId(1)).unwrap().pos, a);

        prop_assert!(registry.swap(ContainerId(0), ContainerId(1)));
        settle(&mut registry);
        prop_assert_eq!(registry.get(ContainerId(0)).unwrap().pos, a);
        prop_assert_eq!(registry.get(ContainerId(1)).unwrap().pos, b);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn round_invariants_hold_through_play(
        seed in any::<u64>(),
        count in 2usize..=5,
        picks in prop::collection::vec(any::<bool>(), 8),
    ) {
        let settings = Settings {
            container_count: count,
            base_switch_count: 3,
            difficulty_threshold: 2,
            move_speed: 60.0,
            reveal_hold_secs: 0.0,
            resolve_hold_secs: 0.0,
            ..Settings::default()
        };
        let mut state = GameState::new(&settings, seed).unwrap();
        let mut input = TickInput { start: true, ..Default::default() };
        let mut picks = picks.into_iter();

        for _ in 0..50_000 {
            let events = tick(&mut state, &input, SIM_DT);
            input = TickInput::default();

            let expected = if state.phase.has_lucky() { 1 } else { 0 };
            prop_assert_eq!(state.registry.lucky_count(), expected);
            prop_assert!((MIN_SWITCHES..=MAX_SWITCHES).contains(&state.switch_count));
            for c in state.registry.iter() {
                prop_assert!((MIN_MOVE_SPEED..=MAX_MOVE_SPEED).contains(&c.move_speed));
                prop_assert!(c.arc_height.abs() <= MAX_ARC_HEIGHT);
                prop_assert!(c.pos.is_finite());
            }

            for event in events {
                match event {
                    GameEvent::PhaseChanged { phase: GamePhase::Selecting, .. } => {
                        let Some(correct) = picks.next() else { return Ok(()) };
                        let lucky = state.lucky.unwrap();
                        let choice = if correct {
                            lucky
                        } else {
                            state.registry.ids().find(|&id| id != lucky).unwrap()
                        };
                        input.pointer.push(PointerEvent::Release(choice));
                    }
                    GameEvent::PhaseChanged { phase: GamePhase::Beginning, score } => {
                        prop_assert_eq!(score, 0);
                        prop_assert_eq!(state.switch_count, state.base_switch_count);
                        input.start = true;
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>()) {
        let settings = Settings {
            move_speed: 80.0,
            reveal_hold_secs: 0.0,
            ..Settings::default()
        };
        let play = |seed: u64| {
            let mut state = GameState::new(&settings, seed).unwrap();
            let mut input = TickInput { start: true, ..Default::default() };
            let mut log = Vec::new();
            while state.phase != GamePhase::Selecting && state.time_ticks < 50_000 {
                log.extend(tick(&mut state, &input, SIM_DT));
                input = TickInput::default();
            }
            (log, state.lucky)
        };
        prop_assert_eq!(play(seed), play(seed));
    }
}
