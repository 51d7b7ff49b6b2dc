#![cfg(feature = "std")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use naval_battle::{
    Cell, GameEngine, Orientation, SessionError, ShotOutcome, BOARD_SIZE, NO_PLAYER,
};

const N: usize = BOARD_SIZE as usize;

#[test]
fn test_concurrent_registration_fills_exactly_two_seats() {
    let engine = GameEngine::new();
    let accepted = AtomicUsize::new(0);
    let full = AtomicUsize::new(0);

    thread::scope(|s| {
        for i in 0..16 {
            let (engine, accepted, full) = (&engine, &accepted, &full);
            s.spawn(move || match engine.register_player(&format!("p{}", i)) {
                Ok(_) => {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
                Err(SessionError::SessionFull) => {
                    full.fetch_add(1, Ordering::SeqCst);
                }
                Err(e) => panic!("unexpected rejection: {}", e),
            });
        }
    });

    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    assert_eq!(full.load(Ordering::SeqCst), 14);
    assert_eq!(engine.list_players().len(), 2);
}

#[test]
fn test_racing_shooters_get_one_turn_each() {
    let engine = GameEngine::new();
    let alice = engine.register_player("Alice").unwrap();
    let bob = engine.register_player("Bob").unwrap();
    for player in [alice, bob] {
        engine
            .place_ship(player, 0, 0, 4, Orientation::Vertical)
            .unwrap();
    }
    engine.set_player_ready(alice);
    engine.set_player_ready(bob);

    // Each side retries until its turn comes round; every accepted shot
    // hands the turn over.
    let resolved = [AtomicUsize::new(0), AtomicUsize::new(0)];
    thread::scope(|s| {
        for (slot, player) in [alice, bob].into_iter().enumerate() {
            let (engine, resolved) = (&engine, &resolved);
            s.spawn(move || {
                for y in 0..N {
                    for x in 5..N {
                        loop {
                            match engine.shoot(player, x, y) {
                                ShotOutcome::InvalidTurn => thread::yield_now(),
                                ShotOutcome::Miss => {
                                    resolved[slot].fetch_add(1, Ordering::SeqCst);
                                    break;
                                }
                                other => panic!("unexpected outcome {:?}", other),
                            }
                        }
                    }
                }
            });
        }
    });

    let a = resolved[0].load(Ordering::SeqCst);
    let b = resolved[1].load(Ordering::SeqCst);
    assert_eq!(a, 50);
    assert_eq!(b, 50);
    assert_eq!(engine.current_turn_id(), alice);
    assert_eq!(engine.get_board(alice).unwrap().count(Cell::Miss), 50);
    assert_eq!(engine.get_board(bob).unwrap().count(Cell::Miss), 50);
}

#[test]
fn test_readers_never_see_torn_state() {
    let engine = GameEngine::new();
    let alice = engine.register_player("Alice").unwrap();
    let bob = engine.register_player("Bob").unwrap();
    for player in [alice, bob] {
        for row in 0..5 {
            engine
                .place_ship(player, 0, row, 2, Orientation::Horizontal)
                .unwrap();
        }
    }
    engine.set_player_ready(alice);
    engine.set_player_ready(bob);

    thread::scope(|s| {
        let engine = &engine;
        s.spawn(move || {
            // Both sides sweep the enemy board row by row.
            let mut fired = [0usize; 2];
            while !engine.is_game_over() {
                let holder = engine.current_turn_id();
                let slot = if holder == alice { 0 } else { 1 };
                let k = fired[slot];
                assert!(k < N * N);
                assert!(engine.shoot(holder, k % N, k / N).is_resolved());
                fired[slot] += 1;
            }
        });

        for _ in 0..4 {
            s.spawn(move || {
                for _ in 0..2_000 {
                    let Some(snapshot) = engine.snapshot() else {
                        panic!("session vanished");
                    };
                    if snapshot.winner == NO_PLAYER {
                        assert_ne!(snapshot.current_turn, NO_PLAYER);
                    } else {
                        assert_eq!(snapshot.current_turn, NO_PLAYER);
                    }
                    for player in [alice, bob] {
                        let view = engine.get_board(player).unwrap();
                        assert_eq!(view.count(Cell::Ship) + view.count(Cell::Hit), 10);
                        assert_eq!(engine.get_enemy_board(player).unwrap().count(Cell::Ship), 0);
                    }
                }
            });
        }
    });

    assert!(engine.is_game_over());
    assert_eq!(engine.get_winner().as_deref(), Some("Alice"));
}
