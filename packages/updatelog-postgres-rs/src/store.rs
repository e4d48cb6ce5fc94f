use std::cell::RefCell;
use std::rc::Rc;

use postgres::Client;
use updatelog_core::{Error, Result, SequenceStore};

const ALLOC_LOCK_KEY: i64 = 0x7570646c6f676131; // "updloga1"

fn storage_debug<E: std::fmt::Debug>(e: E) -> Error {
    Error::Storage(format!("{e:?}"))
}

/// Postgres-backed [`SequenceStore`] over the `updatelog_ids` table.
///
/// Within one `INSERT ... SELECT` Postgres draws `nextval` per row, and a
/// concurrent writer on another connection can interleave its own draws, which
/// would break the contiguous-run contract. Allocations therefore take
/// `pg_advisory_xact_lock` for the duration of the insert transaction, and the
/// run that comes back from `RETURNING id` is verified before the last id is
/// reported.
pub struct PgSequenceStore {
    client: Rc<RefCell<Client>>,
}

impl PgSequenceStore {
    pub fn new(client: Rc<RefCell<Client>>) -> Self {
        Self { client }
    }

    pub fn namespace_of(&self, id: u64) -> Result<Option<String>> {
        let mut c = self.client.borrow_mut();
        let rows = c
            .query(
                "SELECT namespace FROM updatelog_ids WHERE id = $1",
                &[&(id as i64)],
            )
            .map_err(storage_debug)?;
        Ok(rows.first().map(|row| row.get::<_, String>(0)))
    }
}

impl SequenceStore for PgSequenceStore {
    fn append_rows(&mut self, namespace: &str, count: usize) -> Result<Option<u64>> {
        if count == 0 {
            return Ok(None);
        }

        let mut c = self.client.borrow_mut();
        let mut tx = c.transaction().map_err(storage_debug)?;
        tx.query_one("SELECT pg_advisory_xact_lock($1)", &[&ALLOC_LOCK_KEY])
            .map_err(storage_debug)?;

        let rows = tx
            .query(
                "INSERT INTO updatelog_ids(namespace) \
                 SELECT $1 FROM generate_series(1, $2) \
                 RETURNING id",
                &[&namespace, &(count as i64)],
            )
            .map_err(storage_debug)?;
        tx.commit().map_err(storage_debug)?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };
        let first = first.get::<_, i64>(0);

        if rows.len() != count {
            return Err(Error::AllocationInvariant(format!(
                "insert of {count} rows returned {} ids",
                rows.len()
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            let id = row.get::<_, i64>(0);
            if id != first + i as i64 {
                return Err(Error::AllocationInvariant(format!(
                    "sequence issued a non-contiguous run at offset {i}: got {id}, expected {}",
                    first + i as i64
                )));
            }
        }

        let last = first + count as i64 - 1;
        if last < 0 {
            return Ok(None);
        }
        Ok(Some(last as u64))
    }
}
