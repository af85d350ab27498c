//! Concurrent admission safety
//!
//! Several handles on one file stand in for several terminals; a shared
//! handle covers threads inside one terminal.

use checkin::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

fn outcomes_from_terminals(cfg: ScanConfig) -> (Vec<ScanOutcome>, CheckinDb, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let setup = CheckinDb::open(temp_dir.path()).unwrap();
    setup.initialize_ids(1, 100).unwrap();

    // Open sequentially; only the scans race
    let terminals: Vec<CheckinDb> = (0..THREADS)
        .map(|_| CheckinDb::open(temp_dir.path()).unwrap())
        .collect();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = terminals
        .into_iter()
        .map(|db| {
            let barrier = Arc::clone(&barrier);
            let cfg = cfg.clone();
            thread::spawn(move || {
                barrier.wait();
                db.scan("EXPO,42", &cfg).unwrap()
            })
        })
        .collect();

    let outcomes = handles.into_iter().map(|h| h.join().unwrap()).collect();
    (outcomes, setup, temp_dir)
}

fn count_kind(outcomes: &[ScanOutcome], kind: &str) -> usize {
    outcomes.iter().filter(|o| o.kind() == kind).count()
}

#[test]
fn test_one_admission_across_terminals_without_re_entry() {
    let (outcomes, db, _temp) = outcomes_from_terminals(ScanConfig::default().with_re_entry(false));

    assert_eq!(count_kind(&outcomes, "success"), 1);
    assert_eq!(count_kind(&outcomes, "duplicate"), THREADS - 1);

    let history = db.history(&ParticipantId::from_number(42)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].entry_type, EntryType::FirstEntry);
    assert_eq!(db.stats().unwrap().entered, 1);
}

#[test]
fn test_one_admission_across_terminals_with_re_entry() {
    let (outcomes, db, _temp) = outcomes_from_terminals(ScanConfig::default().with_re_entry(true));

    assert_eq!(count_kind(&outcomes, "success"), 1);
    assert_eq!(count_kind(&outcomes, "re_entry"), THREADS - 1);

    let history = db.history(&ParticipantId::from_number(42)).unwrap();
    let first_entries = history
        .iter()
        .filter(|e| e.entry_type == EntryType::FirstEntry)
        .count();
    assert_eq!(first_entries, 1);
    assert_eq!(history.len(), THREADS);
    assert_eq!(history[0].entry_type, EntryType::FirstEntry);
}

#[test]
fn test_shared_handle_across_threads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = Arc::new(CheckinDb::open(temp_dir.path()).unwrap());
    db.initialize_ids(1, 50).unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Every thread walks the same ids, so each id is contended
                (1..=50)
                    .map(|n| db.scan(&format!("EXPO,{n}"), &ScanConfig::default().with_re_entry(false)).unwrap())
                    .filter(|o| matches!(o, ScanOutcome::Success { .. }))
                    .count()
            })
        })
        .collect();

    let successes: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(successes, 50);

    let stats = db.stats().unwrap();
    assert_eq!(stats.entered, 50);
    assert_eq!(db.log_count().unwrap(), 50);
}

#[test]
fn test_stats_polling_during_scans() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = Arc::new(CheckinDb::open(temp_dir.path()).unwrap());
    db.initialize_ids(1, 200).unwrap();

    let writer = {
        let db = Arc::clone(&db);
        thread::spawn(move || {
            for n in 1..=200 {
                db.scan(&format!("EXPO,{n}"), &ScanConfig::default()).unwrap();
            }
        })
    };

    let mut last_entered = 0;
    while !writer.is_finished() {
        let stats = db.stats().unwrap();
        assert_eq!(stats.total, 200);
        assert!(stats.entered >= last_entered, "entered count went backwards");
        assert!(stats.recent_logs.len() <= 5);
        last_entered = stats.entered;
    }
    writer.join().unwrap();
    assert_eq!(db.stats().unwrap().entered, 200);
}
