#![forbid(unsafe_code)]
//! SQLite-backed persistence for the `updatelog-core` sequence store.
//!
//! SQLite gives the "bulk insert, then read the last insert id" scheme its
//! guarantee natively: a multi-row `INSERT` runs under the database write
//! lock, so its rowids are contiguous and `last_insert_rowid` names the last
//! of them.

mod storage;

pub use storage::SqliteSequenceStore;
