#![cfg(feature = "std")]

use naval_battle::{
    Board, Cell, GameEngine, Phase, PlayerId, ReadyOutcome, ShotOutcome, BOARD_SIZE,
    DEFAULT_FLEET, NO_PLAYER,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const N: usize = BOARD_SIZE as usize;

fn started_engine(seed: u64) -> (GameEngine, [PlayerId; 2], SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let engine = GameEngine::new();
    let ids = [
        engine.register_player("p1").unwrap(),
        engine.register_player("p2").unwrap(),
    ];
    for &id in &ids {
        let mut scratch = Board::new();
        for &size in &DEFAULT_FLEET {
            let (x, y, orient) = scratch.random_placement(&mut rng, size).unwrap();
            scratch.place_ship(x, y, size, orient).unwrap();
            engine.place_ship(id, x, y, size, orient).unwrap();
        }
    }
    engine.set_player_ready(ids[0]);
    assert_eq!(engine.set_player_ready(ids[1]), ReadyOutcome::Started);
    (engine, ids, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_shots_keep_the_session_consistent(seed in any::<u64>(), shots in 1..250usize) {
        let (engine, ids, mut rng) = started_engine(seed);
        let fleet_cells: usize = DEFAULT_FLEET.iter().sum();

        for _ in 0..shots {
            let before = engine.snapshot().unwrap();
            let holder = before.current_turn;
            let shooter = if rng.random_bool(0.8) || holder == NO_PLAYER {
                holder
            } else {
                ids.iter().copied().find(|&id| id != holder).unwrap()
            };
            let x = rng.random_range(0..N + 1);
            let y = rng.random_range(0..N + 1);
            let outcome = engine.shoot(shooter, x, y);
            let after = engine.snapshot().unwrap();

            match before.phase {
                Phase::Finished => prop_assert_eq!(outcome, ShotOutcome::GameAlreadyOver),
                _ if shooter != holder => prop_assert_eq!(outcome, ShotOutcome::InvalidTurn),
                _ if x >= N || y >= N => prop_assert_eq!(outcome, ShotOutcome::OutOfBounds),
                _ => {}
            }

            if outcome.is_resolved() {
                if after.phase == Phase::Finished {
                    prop_assert_eq!(after.winner, shooter);
                    prop_assert_eq!(after.current_turn, NO_PLAYER);
                } else {
                    prop_assert_ne!(after.current_turn, holder);
                }
            } else {
                prop_assert_eq!(&after, &before);
            }

            for &id in &ids {
                let view = engine.get_board(id).unwrap();
                prop_assert_eq!(
                    view.count(Cell::Ship) + view.count(Cell::Hit),
                    fleet_cells
                );
            }
        }

        if engine.is_game_over() {
            let winner = engine.winner_id();
            let loser = ids.iter().copied().find(|&id| id != winner).unwrap();
            prop_assert_eq!(engine.get_board(loser).unwrap().count(Cell::Ship), 0);
            prop_assert!(engine.get_board(winner).unwrap().count(Cell::Ship) > 0);
        }
    }
}
