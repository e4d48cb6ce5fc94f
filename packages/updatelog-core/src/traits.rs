use crate::error::Result;

/// Durable sequence table: one row per allocated identifier, tagged with the
/// logical namespace it was minted for. A single numeric sequence backs every
/// namespace; the tag is metadata, not a partition of the number space.
///
/// Correctness contract for implementations, which the allocator depends on and
/// performs no locking of its own to enforce:
///
/// - `append_rows` must write all `count` rows as one atomic unit and report
///   the id the store assigned to the *last* of them.
/// - The ids assigned within that one write must be a contiguous ascending run
///   with no other writer's rows interleaved inside it. MySQL's
///   `LAST_INSERT_ID` with a multi-row `INSERT` and SQLite's
///   `last_insert_rowid` give this within a single statement; engines without
///   an equivalent guarantee must serialize allocations explicitly.
/// - Assigned ids are never reused, even if rows are later removed by an
///   external retention job.
///
/// `Ok(None)` means the store reported no id for the write. Callers treat that
/// as a systemic misconfiguration, fatal rather than retryable.
pub trait SequenceStore {
    fn append_rows(&mut self, namespace: &str, count: usize) -> Result<Option<u64>>;
}

/// In-memory sequence table for tests and prototyping.
#[derive(Debug)]
pub struct MemorySequenceStore {
    rows: Vec<(u64, String)>,
    next: u64,
}

impl Default for MemorySequenceStore {
    // Relational auto-increment columns start at 1; match them.
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl MemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the counter so that the next assigned id is `next`. Lets tests
    /// pin down arithmetic against a known last-assigned value.
    pub fn starting_at(next: u64) -> Self {
        Self {
            rows: Vec::new(),
            next,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn namespace_of(&self, id: u64) -> Option<&str> {
        self.rows
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, namespace)| namespace.as_str())
    }
}

impl SequenceStore for MemorySequenceStore {
    fn append_rows(&mut self, namespace: &str, count: usize) -> Result<Option<u64>> {
        let mut last = None;
        for _ in 0..count {
            let id = self.next;
            self.next += 1;
            self.rows.push((id, namespace.to_owned()));
            last = Some(id);
        }
        Ok(last)
    }
}
