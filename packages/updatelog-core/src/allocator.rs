//! Batched identifier allocation.
//!
//! One bulk append plus one reported-last-id read buys `count` globally unique,
//! contiguous identifiers, instead of a store round trip per id. The allocator
//! is stateless; each call is handed a store and must treat the append + read
//! as a single unit of work with no interleaved writes of its own.

use crate::error::{Error, Result};
use crate::ids::SequenceId;
use crate::traits::SequenceStore;

/// Issues a contiguous ascending run of `count` fresh identifiers tagged with
/// `namespace`.
///
/// `count == 0` returns an empty run without touching the store. The returned
/// ids satisfy `result[i] = result[0] + i` and never overlap any run issued
/// before or concurrently, in any namespace; disjointness across concurrent
/// callers rests on the store's atomicity contract (see [`SequenceStore`]).
///
/// A caller that gives up after the append has happened must still treat the
/// run as consumed: the rows are durably recorded and will not be reissued.
pub fn allocate(
    store: &mut impl SequenceStore,
    namespace: &str,
    count: usize,
) -> Result<Vec<SequenceId>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let last = store.append_rows(namespace, count)?.ok_or_else(|| {
        Error::AllocationInvariant(format!(
            "store reported no id for an append of {count} rows in namespace {namespace:?}"
        ))
    })?;

    let count = count as u64;
    if last < count - 1 {
        return Err(Error::AllocationInvariant(format!(
            "last assigned id {last} cannot terminate a run of {count} rows"
        )));
    }
    let first = last - count + 1;
    Ok((first..=last).map(SequenceId).collect())
}
