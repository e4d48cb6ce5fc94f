//! Canonical dedup keys and the sync watermark.
//!
//! A key identifies "the logical entity this update is about" within its type
//! category. Two updates with the same `(type, key)` supersede one another; the
//! later `time` wins. A `None` key means the update is never collapsed.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::ids::Timestamp;
use crate::updates::{UpdateData, UpdateInfo, UpdateType};

/// Dedup key for an update that has not been resolved for a client yet.
///
/// Total over all nine kinds; `None` only for BAD_DEVICE_TOKEN, which is never
/// deduplicated because every token invalidation is independently significant.
pub fn key_for_update_data(data: &UpdateData) -> Option<&str> {
    match data {
        UpdateData::UpdateThread { thread_id, .. }
        | UpdateData::UpdateThreadReadStatus { thread_id, .. }
        | UpdateData::DeleteThread { thread_id, .. }
        | UpdateData::JoinThread { thread_id, .. } => Some(thread_id),
        UpdateData::UpdateEntry { entry_id, .. } => Some(entry_id),
        UpdateData::UpdateCurrentUser { user_id, .. } => Some(user_id),
        UpdateData::DeleteAccount {
            deleted_user_id, ..
        } => Some(deleted_user_id),
        UpdateData::UpdateUser {
            updated_user_id, ..
        } => Some(updated_user_id),
        UpdateData::BadDeviceToken { .. } => None,
    }
}

/// Dedup key for a resolved update. Keys off the embedded payload's identity
/// where one is present (UPDATE_THREAD and JOIN_THREAD use the resolved
/// thread's id, which matches the raw `threadID` of the pre-resolution forms).
///
/// Fails with [`Error::MissingEntryId`] for an UPDATE_ENTRY whose embedded
/// entry has no id; such an update must never be synced.
pub fn key_for_update_info(info: &UpdateInfo) -> Result<Option<&str>> {
    match info {
        UpdateInfo::UpdateThread { thread_info, .. }
        | UpdateInfo::JoinThread { thread_info, .. } => Ok(Some(&thread_info.id)),
        UpdateInfo::UpdateThreadReadStatus { thread_id, .. }
        | UpdateInfo::DeleteThread { thread_id, .. } => Ok(Some(thread_id)),
        UpdateInfo::UpdateEntry { entry_info, .. } => match &entry_info.id {
            Some(id) => Ok(Some(id)),
            None => Err(Error::MissingEntryId),
        },
        UpdateInfo::UpdateCurrentUser {
            current_user_info, ..
        } => Ok(Some(&current_user_info.id)),
        UpdateInfo::DeleteAccount {
            deleted_user_id, ..
        } => Ok(Some(deleted_user_id)),
        UpdateInfo::UpdateUser {
            updated_user_id, ..
        } => Ok(Some(updated_user_id)),
        UpdateInfo::BadDeviceToken { .. } => Ok(None),
    }
}

/// Advances a client's "synced through" watermark over a delivered batch.
///
/// Empty batches leave the previous watermark untouched, so the pointer never
/// moves without something having been delivered.
pub fn most_recent_timestamp(updates: &[UpdateInfo], previous_timestamp: Timestamp) -> Timestamp {
    updates
        .iter()
        .map(UpdateInfo::time)
        .max()
        .unwrap_or(previous_timestamp)
}

/// Collapses a batch of pre-identity updates by `(type, key)`.
///
/// Within each keyed group only the entry with the greatest `time` survives;
/// on equal `time` the later arrival wins. Unkeyed entries are all retained.
/// Survivors keep the arrival order of the winning entry.
pub fn dedup_update_datas(updates: Vec<UpdateData>) -> Vec<UpdateData> {
    let keys: Vec<Option<String>> = updates
        .iter()
        .map(|update| key_for_update_data(update).map(str::to_owned))
        .collect();
    collapse(updates, keys)
}

/// Collapses a batch of resolved updates by `(type, key)`. Same policy as
/// [`dedup_update_datas`]; fails if any entry cannot be keyed.
pub fn dedup_update_infos(updates: Vec<UpdateInfo>) -> Result<Vec<UpdateInfo>> {
    let keys: Vec<Option<String>> = updates
        .iter()
        .map(|update| key_for_update_info(update).map(|key| key.map(str::to_owned)))
        .collect::<Result<_>>()?;
    Ok(collapse(updates, keys))
}

trait Batched {
    fn group_type(&self) -> UpdateType;
    fn group_time(&self) -> Timestamp;
}

impl Batched for UpdateData {
    fn group_type(&self) -> UpdateType {
        self.update_type()
    }

    fn group_time(&self) -> Timestamp {
        self.time()
    }
}

impl Batched for UpdateInfo {
    fn group_type(&self) -> UpdateType {
        self.update_type()
    }

    fn group_time(&self) -> Timestamp {
        self.time()
    }
}

fn collapse<U: Batched>(updates: Vec<U>, keys: Vec<Option<String>>) -> Vec<U> {
    let mut winners: HashMap<(UpdateType, String), usize> = HashMap::new();
    let mut retained: Vec<Option<U>> = Vec::with_capacity(updates.len());

    for (update, key) in updates.into_iter().zip(keys) {
        let Some(key) = key else {
            retained.push(Some(update));
            continue;
        };
        let group = (update.group_type(), key);
        match winners.get(&group) {
            Some(&slot) => {
                let superseded = match &retained[slot] {
                    // `>=` makes the later arrival win timestamp ties.
                    Some(current) => update.group_time() >= current.group_time(),
                    None => true,
                };
                if superseded {
                    retained[slot] = None;
                    winners.insert(group, retained.len());
                    retained.push(Some(update));
                }
            }
            None => {
                winners.insert(group, retained.len());
                retained.push(Some(update));
            }
        }
    }

    retained.into_iter().flatten().collect()
}
