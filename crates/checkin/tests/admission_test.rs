//! Admission behavior against a real store

use checkin::prelude::*;
use tempfile::TempDir;

/// Helper to create a test database with ids 1..=10
fn create_test_db() -> (CheckinDb, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = CheckinDb::open(temp_dir.path()).unwrap();
    db.initialize_ids(1, 10).unwrap();
    (db, temp_dir)
}

fn no_re_entry() -> ScanConfig {
    ScanConfig::default().with_re_entry(false)
}

/// Snapshot of everything a scan could change
fn footprint(db: &CheckinDb) -> (u64, u64, u64) {
    let stats = db.stats().unwrap();
    (stats.total, stats.entered, db.log_count().unwrap())
}

#[test]
fn test_first_scan_admits_then_duplicates() {
    let (db, _temp) = create_test_db();
    let id = ParticipantId::from_number(4);

    let first = db.scan("EXPO,4", &no_re_entry()).unwrap();
    assert_eq!(first, ScanOutcome::Success { id: id.clone() });

    for _ in 0..3 {
        let again = db.scan("EXPO,4", &no_re_entry()).unwrap();
        assert_eq!(again, ScanOutcome::DuplicateWarning { id: id.clone() });
    }

    let participant = db.participant(&id).unwrap().unwrap();
    assert_eq!(participant.status, ParticipantStatus::Entered);

    let history = db.history(&id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].entry_type, EntryType::FirstEntry);
    assert_eq!(history[0].event_name, "EXPO");
}

#[test]
fn test_re_entry_logs_each_scan_without_changing_counts() {
    let (db, _temp) = create_test_db();
    let cfg = ScanConfig::default().with_re_entry(true);

    assert!(matches!(db.scan("EXPO,2", &cfg).unwrap(), ScanOutcome::Success { .. }));
    let before = db.stats().unwrap();

    for _ in 0..4 {
        let outcome = db.scan("EXPO,2", &cfg).unwrap();
        assert!(matches!(outcome, ScanOutcome::ReEntry { .. }));
        assert!(outcome.is_admitted());
    }

    let after = db.stats().unwrap();
    assert_eq!(after.total, before.total);
    assert_eq!(after.entered, before.entered);

    let history = db.history(&ParticipantId::from_number(2)).unwrap();
    let types: Vec<_> = history.iter().map(|e| e.entry_type).collect();
    assert_eq!(
        types,
        [
            EntryType::FirstEntry,
            EntryType::ReEntry,
            EntryType::ReEntry,
            EntryType::ReEntry,
            EntryType::ReEntry
        ]
    );
}

#[test]
fn test_padding_normalization() {
    let (db, _temp) = create_test_db();
    let cfg = no_re_entry();

    let short = db.scan("EVT,7", &cfg).unwrap();
    let padded = db.scan("EVT,000007", &cfg).unwrap();
    let spaced = db.scan("EVT,  7 ", &cfg).unwrap();

    assert_eq!(short, ScanOutcome::Success { id: ParticipantId::normalize("000007") });
    assert_eq!(padded, ScanOutcome::DuplicateWarning { id: ParticipantId::normalize("7") });
    assert_eq!(spaced.id().as_str(), "000007");
}

#[test]
fn test_unregistered_id() {
    let (db, _temp) = create_test_db();
    let before = footprint(&db);

    let outcome = db.scan("EXPO,999", &ScanConfig::default()).unwrap();
    assert_eq!(
        outcome,
        ScanOutcome::Rejected {
            id: ParticipantId::from_number(999),
            reason: RejectReason::UnregisteredId,
        }
    );
    assert_eq!(outcome.message(), "Unregistered ID");
    assert_eq!(footprint(&db), before);
}

#[test]
fn test_event_mismatch_is_store_free() {
    let (db, _temp) = create_test_db();
    let before = footprint(&db);

    let cfg = ScanConfig::default().with_event_name("EXPO");
    let outcome = db.scan("FAIR,3", &cfg).unwrap();
    assert_eq!(outcome.reject_reason(), Some(RejectReason::EventMismatch));
    assert_eq!(outcome.id().as_str(), "000003");

    // Mismatch wins even when the id is garbage, and the garbage is echoed
    let outcome = db.scan("FAIR,x1", &cfg).unwrap();
    assert_eq!(outcome.reject_reason(), Some(RejectReason::EventMismatch));
    assert_eq!(outcome.id().as_str(), "0000x1");

    assert_eq!(footprint(&db), before);
    assert!(db.history(&ParticipantId::from_number(3)).unwrap().is_empty());
}

#[test]
fn test_range_floor_is_store_free() {
    let (db, _temp) = create_test_db();
    let before = footprint(&db);

    let cfg = ScanConfig::default().with_min_id(5);
    let outcome = db.scan("EXPO,4", &cfg).unwrap();
    assert_eq!(
        outcome.reject_reason(),
        Some(RejectReason::BelowRangeFloor { min_id: 5 })
    );
    assert_eq!(outcome.message(), "Invalid (below 5)");
    assert_eq!(footprint(&db), before);

    assert!(matches!(db.scan("EXPO,5", &cfg).unwrap(), ScanOutcome::Success { .. }));
}

#[test]
fn test_range_floor_off_ignores_min_id() {
    let (db, _temp) = create_test_db();
    let cfg = ScanConfig {
        range_limit_on: false,
        min_id: 9,
        ..ScanConfig::default()
    };
    assert!(matches!(db.scan("EXPO,1", &cfg).unwrap(), ScanOutcome::Success { .. }));
}

#[test]
fn test_malformed_payloads_are_rejections_not_faults() {
    let (db, _temp) = create_test_db();
    let before = footprint(&db);

    for raw in ["EXPO,abc", "EXPO,1.5", "EXPO,-1", "EXPO,1,2"] {
        let outcome = db.scan(raw, &ScanConfig::default().with_min_id(1)).unwrap();
        assert_eq!(
            outcome.reject_reason(),
            Some(RejectReason::MalformedId),
            "payload {raw:?}"
        );
    }
    assert_eq!(footprint(&db), before);
}

#[test]
fn test_empty_id_portion_pads_to_zero() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = CheckinDb::open(temp_dir.path()).unwrap();
    db.initialize_ids(0, 3).unwrap();
    let zero = ParticipantId::from_number(0);

    let outcome = db.scan("EXPO,", &ScanConfig::default()).unwrap();
    assert_eq!(outcome, ScanOutcome::Success { id: zero.clone() });

    // No comma at all is the same participant
    let outcome = db.scan("EXPO", &ScanConfig::default()).unwrap();
    assert_eq!(outcome, ScanOutcome::ReEntry { id: zero.clone() });
    assert_eq!(db.history(&zero).unwrap().len(), 2);
}

#[test]
fn test_scan_while_other_terminal_writes_is_a_fault() {
    let temp_dir = tempfile::tempdir().unwrap();
    let cfg = StoreConfig::in_dir(temp_dir.path()).with_busy_timeout_ms(50);
    let holder = CheckinDb::open_with_config(cfg.clone()).unwrap();
    let scanner = CheckinDb::open_with_config(cfg).unwrap();
    holder.initialize_ids(1, 3).unwrap();

    let held = holder.store().begin_write().unwrap();
    let err = scanner.scan("EXPO,2", &ScanConfig::default()).unwrap_err();
    assert!(matches!(err, CheckinError::Busy(_)), "{err:?}");
    assert_eq!(err.user_message(), checkin::SYSTEM_UNAVAILABLE);
    drop(held);

    // Nothing was admitted while the lock was held
    let id = ParticipantId::from_number(2);
    assert_eq!(
        scanner.participant(&id).unwrap().unwrap().status,
        ParticipantStatus::NotEntered
    );
    assert!(scanner.history(&id).unwrap().is_empty());
    assert_eq!(
        scanner.scan("EXPO,2", &ScanConfig::default()).unwrap(),
        ScanOutcome::Success { id }
    );
}

#[test]
fn test_empty_event_filter_accepts_any_event() {
    let (db, _temp) = create_test_db();
    let cfg = ScanConfig::default().with_event_name("");
    let outcome = db.scan("WHATEVER,1", &cfg).unwrap();
    assert!(matches!(outcome, ScanOutcome::Success { .. }));
    assert_eq!(db.history(&ParticipantId::from_number(1)).unwrap()[0].event_name, "WHATEVER");
}

#[test]
fn test_log_sequence_is_monotonic() {
    let (db, _temp) = create_test_db();
    let cfg = ScanConfig::default();
    for n in [5, 3, 9, 3, 5] {
        db.scan(&format!("EXPO,{n}"), &cfg).unwrap();
    }
    let recent = db.stats().unwrap().recent_logs;
    let ids: Vec<i64> = recent.iter().map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
    assert_eq!(recent[0].participant_id.as_str(), "000005");
    assert_eq!(recent[0].entry_type, EntryType::ReEntry);
}
