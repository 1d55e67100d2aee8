//! Feedback Model

use serde::{Deserialize, Serialize};

/// Feedback document
///
/// `orderId` links the feedback to an order when the guest left one
/// after dining; standalone feedback carries only `userId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: String,
}

/// Feedback for creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub order_id: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Feedback for update (all optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
