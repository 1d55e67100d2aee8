//! Walk-in Queue Entry Model
//!
//! Rows live in SQLite (`queue_entry` table). Entries are grouped by
//! (queueDate, guests, hall, segment); `position` is the rank within
//! that group and `estimatedWaitMinutes` is always `position * 60`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A party waiting for a walk-in table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub name: String,
    pub guests: i64,
    pub notification_method: String,
    pub contact: String,
    pub hall: String,
    pub segment: String,
    pub position: i64,
    pub estimated_wait_minutes: f64,
    pub joined_at: NaiveDateTime,
    pub queue_date: String,
    pub notified_at_5_min: bool,
}

/// Join payload (wire format)
///
/// Every field except `notifiedAt5Min` is required; presence is checked
/// field by field so the error names the first missing one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueJoin {
    pub id: Option<String>,
    pub name: Option<String>,
    pub guests: Option<i64>,
    pub notification_method: Option<String>,
    pub contact: Option<String>,
    pub hall: Option<String>,
    pub segment: Option<String>,
    pub queue_date: Option<String>,
    pub notified_at_5_min: Option<bool>,
}

/// Validated join data, ready for insertion
///
/// `position`, `estimatedWaitMinutes` and `joinedAt` are assigned by
/// the repository inside the join transaction.
#[derive(Debug, Clone)]
pub struct NewQueueEntry {
    pub id: String,
    pub name: String,
    pub guests: i64,
    pub notification_method: String,
    pub contact: String,
    pub hall: String,
    pub segment: String,
    pub queue_date: String,
    pub notified_at_5_min: bool,
}

/// Patch payload for a queue entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryPatch {
    pub notified_at_5_min: Option<bool>,
    pub estimated_wait_minutes: Option<f64>,
}

/// Queue listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueList {
    pub entries: Vec<QueueEntry>,
}
