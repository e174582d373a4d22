//! Bans

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::time::Expiration;

/// A ban on a ban list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ban {
    /// Ban record id, used for deletion.
    pub id: String,
    /// Reason shown to the player.
    pub reason: String,
    /// When the ban lapses.
    pub expiration: Expiration,
    /// When the ban was issued.
    pub created: DateTime<Utc>,
    /// Upstream status code, e.g. `Ban.ACTIVE`.
    pub status: String,
}
