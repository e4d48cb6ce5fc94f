#![forbid(unsafe_code)]
//! Shared conformance suite for [`SequenceStore`] backends plus a few update
//! fixtures. Backend crates run [`check_sequence_store`] against a fresh store
//! so every implementation is held to the same allocation contract.

use updatelog_core::{allocate, namespaces, SequenceId, SequenceStore, UpdateData};

/// Runs the allocation contract against a fresh (or at least quiescent) store.
///
/// Panics on the first violated property, so it is only suitable inside tests.
pub fn check_sequence_store(store: &mut impl SequenceStore) {
    // Zero-count fast path issues nothing.
    let empty = allocate(store, namespaces::UPDATE, 0).expect("zero-count allocation");
    assert!(empty.is_empty(), "allocate(_, 0) must return an empty run");

    // Each run is contiguous and ascending.
    let first_run = allocate(store, namespaces::THREAD, 4).expect("first allocation");
    assert_eq!(first_run.len(), 4);
    assert_contiguous(&first_run);

    // Runs from separate calls never overlap, whatever the namespace.
    let second_run = allocate(store, namespaces::UPDATE, 3).expect("second allocation");
    assert_eq!(second_run.len(), 3);
    assert_contiguous(&second_run);
    assert!(
        second_run[0].value() > first_run[3].value(),
        "later run must start past the earlier run (got {} after {})",
        second_run[0],
        first_run[3],
    );

    // Single-id allocation is just a run of length one.
    let single = allocate(store, namespaces::MESSAGE, 1).expect("single allocation");
    assert_eq!(single.len(), 1);
    assert!(single[0].value() > second_run[2].value());
}

fn assert_contiguous(run: &[SequenceId]) {
    for (i, id) in run.iter().enumerate() {
        assert_eq!(
            id.value(),
            run[0].value() + i as u64,
            "run is not contiguous at offset {i}"
        );
    }
}

/// One update data of every kind, for exhaustiveness-style tests.
pub fn one_of_each_update_data() -> Vec<UpdateData> {
    vec![
        UpdateData::UpdateThread {
            time: 1,
            thread_id: "t".into(),
        },
        UpdateData::UpdateThreadReadStatus {
            time: 2,
            thread_id: "t".into(),
            unread: true,
        },
        UpdateData::DeleteThread {
            time: 3,
            thread_id: "t".into(),
        },
        UpdateData::JoinThread {
            time: 4,
            thread_id: "t".into(),
        },
        UpdateData::UpdateEntry {
            time: 5,
            entry_id: "e".into(),
        },
        UpdateData::UpdateCurrentUser {
            time: 6,
            user_id: "u".into(),
        },
        UpdateData::DeleteAccount {
            time: 7,
            deleted_user_id: "u".into(),
        },
        UpdateData::UpdateUser {
            time: 8,
            updated_user_id: "u2".into(),
        },
        UpdateData::BadDeviceToken {
            time: 9,
            device_token: "tok".into(),
        },
    ]
}
