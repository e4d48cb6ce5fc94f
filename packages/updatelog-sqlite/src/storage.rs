use rusqlite::{params_from_iter, Connection};
use updatelog_core::{error::Error, Result, SequenceStore};

/// SQLite-backed [`SequenceStore`] that persists the sequence table in an
/// `ids(id, namespace)` table with an `AUTOINCREMENT` rowid.
///
/// `AUTOINCREMENT` (rather than a bare `INTEGER PRIMARY KEY`) matters: it
/// forbids rowid reuse after rows are deleted, so an external retention job
/// pruning old rows can never cause an id to be issued twice.
pub struct SqliteSequenceStore {
    conn: Connection,
}

impl SqliteSequenceStore {
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Storage(e.to_string()))?;
        let mut store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::Storage(e.to_string()))?;
        let mut store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS ids (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    namespace TEXT NOT NULL
                );",
            )
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }

    pub fn row_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ids", [], |row| row.get(0))
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(count.max(0) as u64)
    }

    pub fn namespace_of(&self, id: u64) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT namespace FROM ids WHERE id = ?1")
            .map_err(|e| Error::Storage(e.to_string()))?;
        let mut rows = stmt
            .query([id as i64])
            .map_err(|e| Error::Storage(e.to_string()))?;
        let row = rows.next().map_err(|e| Error::Storage(e.to_string()))?;
        match row {
            Some(row) => {
                let namespace: String = row.get(0).map_err(|e| Error::Storage(e.to_string()))?;
                Ok(Some(namespace))
            }
            None => Ok(None),
        }
    }

    /// Removes allocated rows, as an external retention job would. Assigned ids
    /// stay consumed.
    pub fn prune(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM ids", [])
            .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }
}

impl SequenceStore for SqliteSequenceStore {
    fn append_rows(&mut self, namespace: &str, count: usize) -> Result<Option<u64>> {
        if count == 0 {
            return Ok(None);
        }

        // One multi-row INSERT: SQLite holds the write lock for the whole
        // statement, so the assigned rowids are a contiguous run.
        let placeholders = vec!["(?)"; count].join(", ");
        let sql = format!("INSERT INTO ids(namespace) VALUES {placeholders}");
        let inserted = self
            .conn
            .execute(&sql, params_from_iter(std::iter::repeat_n(namespace, count)))
            .map_err(|e| Error::Storage(e.to_string()))?;
        if inserted != count {
            return Ok(None);
        }

        let last = self.conn.last_insert_rowid();
        if last <= 0 {
            return Ok(None);
        }
        Ok(Some(last as u64))
    }
}
