use std::sync::{Arc, Barrier};
use std::thread;

use holdem_engine::errors::GameError;
use holdem_engine::player::PlayerAction as A;
use holdem_engine::shared::SharedTable;
use holdem_engine::table::{Table, TableConfig};

fn shared() -> SharedTable {
    let table = Table::new(
        3,
        TableConfig {
            limit: 100,
            seed: Some(5),
            ..TableConfig::default()
        },
    );
    let shared = SharedTable::new(table);
    for id in 1..=3 {
        shared.seat_player(id, format!("p{}", id), 1_000).unwrap();
    }
    shared
}

#[test]
fn concurrent_actions_are_applied_once() {
    let table = shared();
    table.start_hand().unwrap();

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let table = table.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                table.make_action(1, A::Call)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
        e,
        GameError::NotPlayersTurn {
            expected: 2,
            actual: 1
        }
    )));

    let snap = table.snapshot().unwrap();
    assert_eq!(snap.pot, 50);
    assert_eq!(snap.acting_seat, Some(1));
}

#[test]
fn with_runs_a_closure_under_the_lock() {
    let table = shared();
    let count = table.with(|t| Ok(t.players().len())).unwrap();
    assert_eq!(count, 3);

    let err = table.with(|t| t.make_action(1, A::Check)).unwrap_err();
    assert_eq!(err, GameError::NoHandInProgress);
}

#[test]
fn poisoned_lock_reports_table_unavailable() {
    let table = shared();
    let poisoner = table.clone();
    let _ = thread::spawn(move || {
        let _: Result<(), GameError> = poisoner.with(|_| panic!("boom"));
    })
    .join();

    assert_eq!(table.start_hand(), Err(GameError::TableUnavailable));
    assert_eq!(table.snapshot().err(), Some(GameError::TableUnavailable));
}
