use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::OnceLock;

use postgres::{Client, NoTls};
use uuid::Uuid;

use updatelog_core::allocate;
use updatelog_postgres::{ensure_schema, reset_namespace_for_tests, PgSequenceStore};
use updatelog_test_support::check_sequence_store;

fn connect() -> Option<Rc<RefCell<Client>>> {
    let url = std::env::var("UPDATELOG_POSTGRES_URL").ok()?;
    let client = Client::connect(&url, NoTls).ok()?;
    Some(Rc::new(RefCell::new(client)))
}

fn connect_raw() -> Option<Client> {
    let url = std::env::var("UPDATELOG_POSTGRES_URL").ok()?;
    Client::connect(&url, NoTls).ok()
}

fn ensure_schema_once(client: &Rc<RefCell<Client>>) {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        let mut c = client.borrow_mut();
        ensure_schema(&mut c).unwrap();
    });
}

#[test]
fn postgres_backend_passes_the_conformance_suite() {
    let Some(client) = connect() else {
        return;
    };
    ensure_schema_once(&client);

    let mut store = PgSequenceStore::new(client);
    check_sequence_store(&mut store);
}

#[test]
fn postgres_backend_records_namespaces() {
    let Some(client) = connect() else {
        return;
    };
    ensure_schema_once(&client);

    let namespace = format!("test-{}", Uuid::new_v4());
    let mut store = PgSequenceStore::new(client.clone());
    let ids = allocate(&mut store, &namespace, 3).unwrap();

    for id in &ids {
        assert_eq!(
            store.namespace_of(id.value()).unwrap().as_deref(),
            Some(namespace.as_str())
        );
    }

    let mut c = client.borrow_mut();
    reset_namespace_for_tests(&mut c, &namespace).unwrap();
}

#[test]
fn pruned_namespaces_do_not_rewind_the_sequence() {
    let Some(client) = connect() else {
        return;
    };
    ensure_schema_once(&client);

    let namespace = format!("test-{}", Uuid::new_v4());
    let mut store = PgSequenceStore::new(client.clone());
    let before = allocate(&mut store, &namespace, 2).unwrap();

    {
        let mut c = client.borrow_mut();
        reset_namespace_for_tests(&mut c, &namespace).unwrap();
    }

    let after = allocate(&mut store, &namespace, 2).unwrap();
    assert!(after[0].value() > before[1].value());

    let mut c = client.borrow_mut();
    reset_namespace_for_tests(&mut c, &namespace).unwrap();
}

#[test]
fn concurrent_allocations_never_overlap() {
    // Two independent connections hammering the same sequence table: every run
    // must be contiguous and all runs mutually disjoint.
    if connect_raw().is_none() {
        return;
    }

    let namespace = format!("test-{}", Uuid::new_v4());
    {
        let client = connect().unwrap();
        ensure_schema_once(&client);
    }

    let mut handles = Vec::new();
    for _ in 0..2 {
        let namespace = namespace.clone();
        handles.push(std::thread::spawn(move || {
            let client = connect_raw().expect("worker connection");
            let mut store = PgSequenceStore::new(Rc::new(RefCell::new(client)));
            let mut issued = Vec::new();
            for _ in 0..20 {
                let run = allocate(&mut store, &namespace, 5).unwrap();
                for (i, id) in run.iter().enumerate() {
                    assert_eq!(id.value(), run[0].value() + i as u64);
                }
                issued.extend(run.into_iter().map(|id| id.value()));
            }
            issued
        }));
    }

    let mut all: HashSet<u64> = HashSet::new();
    let mut total = 0usize;
    for handle in handles {
        let issued = handle.join().unwrap();
        total += issued.len();
        all.extend(issued);
    }
    assert_eq!(all.len(), total, "overlapping ids issued across connections");

    let mut c = connect_raw().unwrap();
    reset_namespace_for_tests(&mut c, &namespace).unwrap();
}
