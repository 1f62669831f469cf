#![forbid(unsafe_code)]
use chrono::{DateTime, Duration, TimeZone, Utc};
use dutyroster::{
    AssignError, AssignOptions, ConflictKind, Duty, DutyId, DutyStore, RecordingNotifier,
    StoreError,
};
use std::cell::RefCell;
use std::collections::BTreeSet;

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
}

fn duty(id: u32, start: DateTime<Utc>, end: DateTime<Utc>) -> Duty {
    Duty::new(DutyId::new(id), format!("Duty {id}"), "Depot A", start, end).unwrap()
}

fn ids(duties: &[Duty]) -> Vec<u32> {
    duties.iter().map(|d| d.id().get()).collect()
}

fn id(n: u32) -> DutyId {
    DutyId::new(n)
}

/// Trois journées espacées, aucun conflit entre elles.
fn spread_universe() -> Vec<Duty> {
    vec![
        duty(1, at(1, 9), at(1, 17)),
        duty(2, at(3, 9), at(3, 17)),
        duty(3, at(5, 9), at(5, 17)),
    ]
}

#[test]
fn initialize_keeps_input_order() {
    let universe = vec![
        duty(3, at(5, 9), at(5, 17)),
        duty(1, at(1, 9), at(1, 17)),
        duty(2, at(3, 9), at(3, 17)),
    ];
    let store = DutyStore::new(universe).unwrap();
    assert_eq!(ids(store.available()), vec![3, 1, 2]);
    assert!(store.assigned().is_empty());
    assert_eq!(store.len(), 3);
}

#[test]
fn initialize_rejects_duplicate_ids() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(1, at(3, 9), at(3, 17))];
    let err = DutyStore::new(universe).unwrap_err();
    assert_eq!(err, StoreError::DuplicateDuty(id(1)));
}

#[test]
fn scenario_overlap_is_rejected_and_state_unchanged() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(1, 10), at(1, 18))];
    let mut store = DutyStore::with_notifier(universe, RecordingNotifier::new()).unwrap();

    store.assign(id(1)).unwrap();
    assert_eq!(ids(store.assigned()), vec![1]);
    assert_eq!(ids(store.available()), vec![2]);

    let err = store.assign(id(2)).unwrap_err();
    assert_eq!(err.conflict_kind(), Some(ConflictKind::Overlap));
    assert_eq!(ids(store.assigned()), vec![1]);
    assert_eq!(ids(store.available()), vec![2]);
    assert_eq!(
        store.notifier().messages(),
        vec!["Overlapping duties are not allowed".to_string()]
    );
}

#[test]
fn scenario_night_duty_lacks_rest() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(1, 22), at(2, 6))];
    let mut store = DutyStore::with_notifier(universe, RecordingNotifier::new()).unwrap();

    store.assign(id(1)).unwrap();
    let err = store.assign(id(2)).unwrap_err();
    assert_eq!(err.conflict_kind(), Some(ConflictKind::InsufficientRest));
    assert_eq!(
        err.to_string(),
        "Minimum 8-hour rest period required between duties"
    );
    assert_eq!(
        store.notifier().last().as_deref(),
        Some("Minimum 8-hour rest period required between duties")
    );
    assert_eq!(ids(store.assigned()), vec![1]);
}

#[test]
fn scenario_exact_rest_is_accepted() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(2, 1), at(2, 9))];
    let mut store = DutyStore::with_notifier(universe, RecordingNotifier::new()).unwrap();

    store.assign(id(1)).unwrap();
    store.assign(id(2)).unwrap();
    assert_eq!(ids(store.assigned()), vec![1, 2]);
    assert!(store.available().is_empty());
    assert!(store.notifier().messages().is_empty());
}

#[test]
fn scenario_unassign_restores_id_order() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(3, 9), at(3, 17))];
    let mut store = DutyStore::new(universe).unwrap();

    store.assign(id(2)).unwrap();
    store.assign(id(1)).unwrap();
    assert_eq!(ids(store.assigned()), vec![2, 1]);

    assert!(store.unassign(id(2)));
    assert_eq!(ids(store.available()), vec![2]);
    assert_eq!(ids(store.assigned()), vec![1]);

    store.assign(id(2)).unwrap();
    assert!(store.unassign(id(2)));
    assert!(store.unassign(id(1)));
    assert_eq!(ids(store.available()), vec![1, 2]);
    assert!(store.assigned().is_empty());
}

#[test]
fn unassign_sorts_whole_available_pool() {
    let universe = vec![
        duty(5, at(9, 9), at(9, 17)),
        duty(2, at(3, 9), at(3, 17)),
        duty(4, at(7, 9), at(7, 17)),
        duty(1, at(1, 9), at(1, 17)),
    ];
    let mut store = DutyStore::new(universe).unwrap();
    store.assign(id(4)).unwrap();
    assert_eq!(ids(store.available()), vec![5, 2, 1]);

    store.unassign(id(4));
    assert_eq!(ids(store.available()), vec![1, 2, 4, 5]);
}

#[test]
fn unassign_of_unknown_or_available_duty_is_noop() {
    let mut store = DutyStore::new(spread_universe()).unwrap();
    assert!(!store.unassign(id(1)));
    assert!(!store.unassign(id(42)));
    assert_eq!(ids(store.available()), vec![1, 2, 3]);
    assert!(store.assigned().is_empty());
}

#[test]
fn assign_reports_unknown_and_already_assigned() {
    let mut store = DutyStore::with_notifier(spread_universe(), RecordingNotifier::new()).unwrap();
    assert_eq!(store.assign(id(9)), Err(AssignError::UnknownDuty(id(9))));

    store.assign(id(1)).unwrap();
    assert_eq!(store.assign(id(1)), Err(AssignError::AlreadyAssigned(id(1))));
    assert_eq!(ids(store.assigned()), vec![1]);
    assert!(store.notifier().messages().is_empty());
}

#[test]
fn partition_holds_after_mixed_operations() {
    let universe = vec![
        duty(1, at(1, 9), at(1, 17)),
        duty(2, at(1, 10), at(1, 18)),
        duty(3, at(1, 22), at(2, 6)),
        duty(4, at(2, 9), at(2, 17)),
        duty(5, at(4, 9), at(4, 17)),
    ];
    let all: BTreeSet<u32> = ids(&universe).into_iter().collect();
    let mut store = DutyStore::new(universe).unwrap();

    let ops: [(bool, u32); 10] = [
        (true, 1),
        (true, 2),
        (true, 3),
        (true, 5),
        (false, 1),
        (true, 3),
        (true, 2),
        (false, 5),
        (true, 4),
        (false, 3),
    ];
    for (assign, n) in ops {
        if assign {
            let _ = store.assign(id(n));
        } else {
            store.unassign(id(n));
        }
        let available: BTreeSet<u32> = ids(store.available()).into_iter().collect();
        let assigned: BTreeSet<u32> = ids(store.assigned()).into_iter().collect();
        assert!(available.is_disjoint(&assigned));
        let union: BTreeSet<u32> = available.union(&assigned).copied().collect();
        assert_eq!(union, all);
        assert_eq!(store.len(), all.len());
    }
}

#[test]
fn rejection_leaves_pools_identical() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(1, 16), at(1, 20))];
    let mut store = DutyStore::new(universe).unwrap();
    store.assign(id(1)).unwrap();

    let before = (store.available().to_vec(), store.assigned().to_vec());
    assert!(store.assign(id(2)).is_err());
    assert_eq!(store.available(), before.0.as_slice());
    assert_eq!(store.assigned(), before.1.as_slice());
}

#[test]
fn custom_rest_applies_to_store_and_message() {
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(2, 2), at(2, 10))];
    let mut store = DutyStore::with_notifier(universe, RecordingNotifier::new())
        .unwrap()
        .with_options(AssignOptions { min_rest_hours: 11 });

    store.assign(id(1)).unwrap();
    assert!(store.assign(id(2)).is_err());
    assert_eq!(
        store.notifier().take(),
        vec!["Minimum 11-hour rest period required between duties".to_string()]
    );
}

#[test]
fn closure_notifier_receives_messages() {
    let seen = RefCell::new(Vec::new());
    let universe = vec![duty(1, at(1, 9), at(1, 17)), duty(2, at(1, 12), at(1, 14))];
    let mut store =
        DutyStore::with_notifier(universe, |m: &str| seen.borrow_mut().push(m.to_owned()))
            .unwrap();

    store.assign(id(1)).unwrap();
    let _ = store.assign(id(2));
    drop(store);
    assert_eq!(seen.into_inner(), vec!["Overlapping duties are not allowed"]);
}

#[test]
fn check_and_read_model_helpers() {
    let mut store = DutyStore::new(spread_universe()).unwrap();
    store.assign(id(1)).unwrap();
    store.assign(id(3)).unwrap();

    assert!(store.is_assigned(id(1)));
    assert!(!store.is_assigned(id(2)));
    assert_eq!(store.get(id(3)).map(|d| d.name()), Some("Duty 3"));
    assert_eq!(store.check(id(2)), Ok(None));
    assert_eq!(store.check(id(1)), Ok(Some(ConflictKind::Overlap)));
    assert_eq!(store.check(id(7)), Err(AssignError::UnknownDuty(id(7))));
    assert_eq!(store.total_assigned_time(), Duration::hours(16));
}
