//! Priority Queue and Whitelist Entries

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::id::CfToolsId;
use crate::core::time::Expiration;

/// A priority queue entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriorityQueueItem {
    /// Who created the entry.
    pub created_by: CfToolsId,
    /// Free-form note.
    pub comment: String,
    /// When the entry lapses.
    pub expiration: Expiration,
    /// When the entry was created.
    pub created: DateTime<Utc>,
}

/// A whitelist entry. Same shape as a priority queue entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WhitelistItem {
    /// Who created the entry.
    pub created_by: CfToolsId,
    /// Free-form note.
    pub comment: String,
    /// When the entry lapses.
    pub expiration: Expiration,
    /// When the entry was created.
    pub created: DateTime<Utc>,
}
