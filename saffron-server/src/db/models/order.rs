//! Order Model

use serde::{Deserialize, Serialize};

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default = "default_status")]
    pub status: String,
    pub date: String,
    pub created_at: String,
}

fn default_status() -> String {
    "pending".to_string()
}

/// A line item inside an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub price: f64,
}

fn default_quantity() -> i64 {
    1
}

/// Order for creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub total: Option<f64>,
    pub status: Option<String>,
    pub date: Option<String>,
}

/// Order for update (all optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
