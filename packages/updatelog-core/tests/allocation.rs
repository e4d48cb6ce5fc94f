use updatelog_core::{allocate, namespaces, Error, MemorySequenceStore, Result, SequenceStore};

#[test]
fn zero_count_allocates_nothing_and_skips_the_store() {
    struct UntouchableStore;

    impl SequenceStore for UntouchableStore {
        fn append_rows(&mut self, _namespace: &str, _count: usize) -> Result<Option<u64>> {
            panic!("allocate(_, 0) must not reach the store");
        }
    }

    let ids = allocate(&mut UntouchableStore, namespaces::UPDATE, 0).unwrap();
    assert!(ids.is_empty());
}

#[test]
fn allocation_is_contiguous_and_ascending() {
    let mut store = MemorySequenceStore::new();
    let ids = allocate(&mut store, namespaces::MESSAGE, 5).unwrap();

    assert_eq!(ids.len(), 5);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(id.value(), ids[0].value() + i as u64);
    }
}

#[test]
fn sequential_allocations_are_disjoint_across_namespaces() {
    let mut store = MemorySequenceStore::new();
    let first = allocate(&mut store, namespaces::THREAD, 3).unwrap();
    let second = allocate(&mut store, namespaces::UPDATE, 4).unwrap();

    // One shared sequence: the second run starts right after the first.
    assert_eq!(second[0].value(), first[2].value() + 1);
    for id in &first {
        assert!(!second.contains(id));
    }
}

#[test]
fn namespace_is_recorded_as_row_metadata() {
    let mut store = MemorySequenceStore::new();
    let thread_ids = allocate(&mut store, namespaces::THREAD, 2).unwrap();
    let entry_ids = allocate(&mut store, namespaces::ENTRY, 1).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.namespace_of(thread_ids[0].value()), Some("thread"));
    assert_eq!(store.namespace_of(entry_ids[0].value()), Some("entry"));
}

#[test]
fn run_is_derived_from_the_last_assigned_id() {
    // A store whose last assigned value comes back as 57 for a 3-row append.
    let mut store = MemorySequenceStore::starting_at(55);
    let ids = allocate(&mut store, namespaces::UPDATE, 3).unwrap();

    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["55", "56", "57"]);
}

#[test]
fn store_reporting_no_id_is_a_fatal_invariant_violation() {
    struct SilentStore;

    impl SequenceStore for SilentStore {
        fn append_rows(&mut self, _namespace: &str, _count: usize) -> Result<Option<u64>> {
            Ok(None)
        }
    }

    let err = allocate(&mut SilentStore, namespaces::UPDATE, 2).unwrap_err();
    assert!(matches!(err, Error::AllocationInvariant(_)));
}

#[test]
fn impossible_last_id_is_a_fatal_invariant_violation() {
    struct BrokenStore;

    impl SequenceStore for BrokenStore {
        fn append_rows(&mut self, _namespace: &str, _count: usize) -> Result<Option<u64>> {
            // Too small to terminate a run of the requested length.
            Ok(Some(1))
        }
    }

    let err = allocate(&mut BrokenStore, namespaces::UPDATE, 3).unwrap_err();
    assert!(matches!(err, Error::AllocationInvariant(_)));
}

#[test]
fn storage_failures_propagate_unretried() {
    struct DownStore;

    impl SequenceStore for DownStore {
        fn append_rows(&mut self, _namespace: &str, _count: usize) -> Result<Option<u64>> {
            Err(Error::Storage("connection lost".into()))
        }
    }

    let err = allocate(&mut DownStore, namespaces::UPDATE, 1).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
}
