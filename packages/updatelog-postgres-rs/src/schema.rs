use postgres::Client;
use updatelog_core::{Error, Result};

const SCHEMA_LOCK_KEY: i64 = 0x7570646c6f676964; // "updlogid"

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS updatelog_ids (
  id BIGSERIAL PRIMARY KEY,
  namespace TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_updatelog_ids_namespace
  ON updatelog_ids (namespace);
"#;

pub fn ensure_schema(client: &mut Client) -> Result<()> {
    // `CREATE TABLE IF NOT EXISTS` is not fully concurrency-safe in Postgres; concurrent calls can
    // still fail with catalog uniqueness violations. Serialize schema creation across processes.
    client
        .query_one("SELECT pg_advisory_lock($1)", &[&SCHEMA_LOCK_KEY])
        .map_err(|e| Error::Storage(format!("{e:?}")))?;

    let res = client
        .batch_execute(SCHEMA_SQL)
        .map_err(|e| Error::Storage(format!("{e:?}")));

    // Best-effort unlock. Locks are also released when the connection is dropped.
    let _ = client.query_one("SELECT pg_advisory_unlock($1)", &[&SCHEMA_LOCK_KEY]);

    res
}

/// Removes the rows a test minted under its own namespace. Ids stay consumed:
/// the backing sequence is never rewound.
pub fn reset_namespace_for_tests(client: &mut Client, namespace: &str) -> Result<()> {
    client
        .execute("DELETE FROM updatelog_ids WHERE namespace = $1", &[&namespace])
        .map_err(|e| Error::Storage(format!("{e:?}")))?;
    Ok(())
}
