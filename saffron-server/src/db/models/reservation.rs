//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation document
///
/// Reservations are keyed by `reservationId` on the wire, unlike the
/// other collections which use `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: String,
    pub user_id: String,
    pub name: String,
    pub guests: i64,
    pub date: String,
    pub time_slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: String,
}

fn default_status() -> String {
    "confirmed".to_string()
}

/// Reservation for creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub reservation_id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub guests: Option<i64>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
    pub table_number: Option<i64>,
    pub status: Option<String>,
}

/// Reservation for update (all optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
