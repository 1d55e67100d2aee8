//! Reservation Waiting List Model
//!
//! Guests who wanted a slot that was fully booked. No positions here;
//! staff work through the list in join order when a table frees up.

use serde::{Deserialize, Serialize};

/// Waiting list document, keyed by `queueId` on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingEntry {
    pub queue_id: String,
    pub user_id: String,
    pub name: String,
    pub guests: i64,
    pub date: String,
    pub time_slot: String,
    pub created_at: String,
}

/// Waiting list join payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingJoin {
    pub queue_id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub guests: Option<i64>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
}
