#![forbid(unsafe_code)]
//! Postgres-backed sequence store for `updatelog-core`.
//!
//! The allocation scheme wants a MySQL-style guarantee that one multi-row
//! `INSERT` draws a contiguous block of auto-increment values. Postgres
//! sequences make no such promise while concurrent writers exist, so this
//! adapter serializes
//! allocations with a transaction-scoped advisory lock and verifies the run it
//! got back (see [`PgSequenceStore`]).

mod schema;
mod store;

pub use schema::{ensure_schema, reset_namespace_for_tests};
pub use store::PgSequenceStore;
