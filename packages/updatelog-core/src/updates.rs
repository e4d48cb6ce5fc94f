use crate::ids::{SequenceId, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discriminant shared by all three update shapes. Used as the wire tag and as
/// half of the `(type, key)` dedup grouping key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum UpdateType {
    UpdateThread,
    UpdateThreadReadStatus,
    DeleteThread,
    JoinThread,
    UpdateEntry,
    UpdateCurrentUser,
    DeleteAccount,
    UpdateUser,
    BadDeviceToken,
}

/// Minimal resolved thread shape. The full thread payload is owned by the thread
/// subsystem; the update log only needs the identity.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreadInfo {
    pub id: String,
}

/// Minimal resolved calendar-entry shape. `id` is `None` for an entry that has
/// not been persisted yet; an [`UpdateInfo`] must never embed one of those.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntryInfo {
    pub id: Option<String>,
}

/// Minimal resolved current-user shape.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentUserInfo {
    pub id: String,
}

/// A state change produced by a mutation path, before an identifier has been
/// allocated for it. Consumed exactly once by [`UpdateData::attach_id`]; never
/// persisted in this form.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase"))]
pub enum UpdateData {
    UpdateThread {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    UpdateThreadReadStatus {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
        unread: bool,
    },
    DeleteThread {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    JoinThread {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    UpdateEntry {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "entryID"))]
        entry_id: String,
    },
    /// Carries the target user so the change can be keyed; the wire form drops
    /// it because the recipient is always the user being synced.
    UpdateCurrentUser {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "userID"))]
        user_id: String,
    },
    DeleteAccount {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "deletedUserID"))]
        deleted_user_id: String,
    },
    UpdateUser {
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "updatedUserID"))]
        updated_user_id: String,
    },
    BadDeviceToken {
        time: Timestamp,
        device_token: String,
    },
}

/// The durable/wire form of an update: an [`UpdateData`] plus its allocated
/// identifier. Immutable once created; owned by the delivery subsystem.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase"))]
pub enum RawUpdateInfo {
    UpdateThread {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    UpdateThreadReadStatus {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
        unread: bool,
    },
    DeleteThread {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    JoinThread {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    UpdateEntry {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "entryID"))]
        entry_id: String,
    },
    UpdateCurrentUser {
        id: SequenceId,
        time: Timestamp,
    },
    DeleteAccount {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "deletedUserID"))]
        deleted_user_id: String,
    },
    UpdateUser {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "updatedUserID"))]
        updated_user_id: String,
    },
    BadDeviceToken {
        id: SequenceId,
        time: Timestamp,
        device_token: String,
    },
}

/// The client-facing form of an update, with entity references resolved into
/// embedded payloads where the client needs them.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase"))]
pub enum UpdateInfo {
    UpdateThread {
        id: SequenceId,
        time: Timestamp,
        thread_info: ThreadInfo,
    },
    UpdateThreadReadStatus {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
        unread: bool,
    },
    DeleteThread {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "threadID"))]
        thread_id: String,
    },
    JoinThread {
        id: SequenceId,
        time: Timestamp,
        thread_info: ThreadInfo,
    },
    UpdateEntry {
        id: SequenceId,
        time: Timestamp,
        entry_info: EntryInfo,
    },
    UpdateCurrentUser {
        id: SequenceId,
        time: Timestamp,
        current_user_info: CurrentUserInfo,
    },
    DeleteAccount {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "deletedUserID"))]
        deleted_user_id: String,
    },
    UpdateUser {
        id: SequenceId,
        time: Timestamp,
        #[cfg_attr(feature = "serde", serde(rename = "updatedUserID"))]
        updated_user_id: String,
    },
    BadDeviceToken {
        id: SequenceId,
        time: Timestamp,
        device_token: String,
    },
}

impl UpdateData {
    pub fn update_type(&self) -> UpdateType {
        match self {
            UpdateData::UpdateThread { .. } => UpdateType::UpdateThread,
            UpdateData::UpdateThreadReadStatus { .. } => UpdateType::UpdateThreadReadStatus,
            UpdateData::DeleteThread { .. } => UpdateType::DeleteThread,
            UpdateData::JoinThread { .. } => UpdateType::JoinThread,
            UpdateData::UpdateEntry { .. } => UpdateType::UpdateEntry,
            UpdateData::UpdateCurrentUser { .. } => UpdateType::UpdateCurrentUser,
            UpdateData::DeleteAccount { .. } => UpdateType::DeleteAccount,
            UpdateData::UpdateUser { .. } => UpdateType::UpdateUser,
            UpdateData::BadDeviceToken { .. } => UpdateType::BadDeviceToken,
        }
    }

    pub fn time(&self) -> Timestamp {
        match self {
            UpdateData::UpdateThread { time, .. }
            | UpdateData::UpdateThreadReadStatus { time, .. }
            | UpdateData::DeleteThread { time, .. }
            | UpdateData::JoinThread { time, .. }
            | UpdateData::UpdateEntry { time, .. }
            | UpdateData::UpdateCurrentUser { time, .. }
            | UpdateData::DeleteAccount { time, .. }
            | UpdateData::UpdateUser { time, .. }
            | UpdateData::BadDeviceToken { time, .. } => *time,
        }
    }

    /// Binds an allocated identifier to this update, producing the durable form.
    ///
    /// Copies `time` and the fields the wire shape of each kind carries, and
    /// drops the rest (UPDATE_CURRENT_USER's target user never reaches the
    /// wire). The match is exhaustive: a kind this conversion cannot handle
    /// cannot be constructed.
    pub fn attach_id(self, id: SequenceId) -> RawUpdateInfo {
        match self {
            UpdateData::UpdateThread { time, thread_id } => RawUpdateInfo::UpdateThread {
                id,
                time,
                thread_id,
            },
            UpdateData::UpdateThreadReadStatus {
                time,
                thread_id,
                unread,
            } => RawUpdateInfo::UpdateThreadReadStatus {
                id,
                time,
                thread_id,
                unread,
            },
            UpdateData::DeleteThread { time, thread_id } => RawUpdateInfo::DeleteThread {
                id,
                time,
                thread_id,
            },
            UpdateData::JoinThread { time, thread_id } => RawUpdateInfo::JoinThread {
                id,
                time,
                thread_id,
            },
            UpdateData::UpdateEntry { time, entry_id } => RawUpdateInfo::UpdateEntry {
                id,
                time,
                entry_id,
            },
            UpdateData::UpdateCurrentUser { time, user_id: _ } => {
                RawUpdateInfo::UpdateCurrentUser { id, time }
            }
            UpdateData::DeleteAccount {
                time,
                deleted_user_id,
            } => RawUpdateInfo::DeleteAccount {
                id,
                time,
                deleted_user_id,
            },
            UpdateData::UpdateUser {
                time,
                updated_user_id,
            } => RawUpdateInfo::UpdateUser {
                id,
                time,
                updated_user_id,
            },
            UpdateData::BadDeviceToken { time, device_token } => RawUpdateInfo::BadDeviceToken {
                id,
                time,
                device_token,
            },
        }
    }
}

impl RawUpdateInfo {
    pub fn update_type(&self) -> UpdateType {
        match self {
            RawUpdateInfo::UpdateThread { .. } => UpdateType::UpdateThread,
            RawUpdateInfo::UpdateThreadReadStatus { .. } => UpdateType::UpdateThreadReadStatus,
            RawUpdateInfo::DeleteThread { .. } => UpdateType::DeleteThread,
            RawUpdateInfo::JoinThread { .. } => UpdateType::JoinThread,
            RawUpdateInfo::UpdateEntry { .. } => UpdateType::UpdateEntry,
            RawUpdateInfo::UpdateCurrentUser { .. } => UpdateType::UpdateCurrentUser,
            RawUpdateInfo::DeleteAccount { .. } => UpdateType::DeleteAccount,
            RawUpdateInfo::UpdateUser { .. } => UpdateType::UpdateUser,
            RawUpdateInfo::BadDeviceToken { .. } => UpdateType::BadDeviceToken,
        }
    }

    pub fn id(&self) -> SequenceId {
        match self {
            RawUpdateInfo::UpdateThread { id, .. }
            | RawUpdateInfo::UpdateThreadReadStatus { id, .. }
            | RawUpdateInfo::DeleteThread { id, .. }
            | RawUpdateInfo::JoinThread { id, .. }
            | RawUpdateInfo::UpdateEntry { id, .. }
            | RawUpdateInfo::UpdateCurrentUser { id, .. }
            | RawUpdateInfo::DeleteAccount { id, .. }
            | RawUpdateInfo::UpdateUser { id, .. }
            | RawUpdateInfo::BadDeviceToken { id, .. } => *id,
        }
    }

    pub fn time(&self) -> Timestamp {
        match self {
            RawUpdateInfo::UpdateThread { time, .. }
            | RawUpdateInfo::UpdateThreadReadStatus { time, .. }
            | RawUpdateInfo::DeleteThread { time, .. }
            | RawUpdateInfo::JoinThread { time, .. }
            | RawUpdateInfo::UpdateEntry { time, .. }
            | RawUpdateInfo::UpdateCurrentUser { time, .. }
            | RawUpdateInfo::DeleteAccount { time, .. }
            | RawUpdateInfo::UpdateUser { time, .. }
            | RawUpdateInfo::BadDeviceToken { time, .. } => *time,
        }
    }
}

impl UpdateInfo {
    pub fn update_type(&self) -> UpdateType {
        match self {
            UpdateInfo::UpdateThread { .. } => UpdateType::UpdateThread,
            UpdateInfo::UpdateThreadReadStatus { .. } => UpdateType::UpdateThreadReadStatus,
            UpdateInfo::DeleteThread { .. } => UpdateType::DeleteThread,
            UpdateInfo::JoinThread { .. } => UpdateType::JoinThread,
            UpdateInfo::UpdateEntry { .. } => UpdateType::UpdateEntry,
            UpdateInfo::UpdateCurrentUser { .. } => UpdateType::UpdateCurrentUser,
            UpdateInfo::DeleteAccount { .. } => UpdateType::DeleteAccount,
            UpdateInfo::UpdateUser { .. } => UpdateType::UpdateUser,
            UpdateInfo::BadDeviceToken { .. } => UpdateType::BadDeviceToken,
        }
    }

    pub fn id(&self) -> SequenceId {
        match self {
            UpdateInfo::UpdateThread { id, .. }
            | UpdateInfo::UpdateThreadReadStatus { id, .. }
            | UpdateInfo::DeleteThread { id, .. }
            | UpdateInfo::JoinThread { id, .. }
            | UpdateInfo::UpdateEntry { id, .. }
            | UpdateInfo::UpdateCurrentUser { id, .. }
            | UpdateInfo::DeleteAccount { id, .. }
            | UpdateInfo::UpdateUser { id, .. }
            | UpdateInfo::BadDeviceToken { id, .. } => *id,
        }
    }

    pub fn time(&self) -> Timestamp {
        match self {
            UpdateInfo::UpdateThread { time, .. }
            | UpdateInfo::UpdateThreadReadStatus { time, .. }
            | UpdateInfo::DeleteThread { time, .. }
            | UpdateInfo::JoinThread { time, .. }
            | UpdateInfo::UpdateEntry { time, .. }
            | UpdateInfo::UpdateCurrentUser { time, .. }
            | UpdateInfo::DeleteAccount { time, .. }
            | UpdateInfo::UpdateUser { time, .. }
            | UpdateInfo::BadDeviceToken { time, .. } => *time,
        }
    }
}
