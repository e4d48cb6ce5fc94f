#![forbid(unsafe_code)]
//! Core primitives for a client-syncable update log: batched identifier
//! allocation over a pluggable sequence store, the update event model, and the
//! keying/dedup/watermark engine the delivery layer builds on. This crate stays
//! independent of concrete storage engines so any backend that can satisfy the
//! [`SequenceStore`] contract can be plugged in.

pub mod allocator;
pub mod error;
pub mod ids;
pub mod keying;
pub mod traits;
pub mod updates;

pub use allocator::allocate;
pub use error::{Error, Result};
pub use ids::{namespaces, SequenceId, Timestamp};
pub use keying::{
    dedup_update_datas, dedup_update_infos, key_for_update_data, key_for_update_info,
    most_recent_timestamp,
};
pub use traits::{MemorySequenceStore, SequenceStore};
pub use updates::{
    CurrentUserInfo, EntryInfo, RawUpdateInfo, ThreadInfo, UpdateData, UpdateInfo, UpdateType,
};
