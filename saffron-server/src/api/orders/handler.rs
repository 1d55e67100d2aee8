//! 订单 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{require, require_text, require_vec};
use crate::utils::{AppError, AppResult, generate_id, time::utc_now};

/// 订单列表过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub user_id: Option<String>,
    pub date: Option<String>,
}

/// GET /orders - 获取订单列表, 按日期倒序
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.store());
    let orders = repo.find_all(query.user_id, query.date).await?;
    Ok(Json(orders))
}

/// GET /orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.store());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("order {id}")))?;
    Ok(Json(order))
}

/// POST /orders - 创建订单
///
/// `items` 不能为空, `status` 缺省为 `pending`。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = Order {
        id: payload.id.unwrap_or_else(generate_id),
        user_id: require_text("userId", payload.user_id)?,
        items: require_vec("items", payload.items)?,
        total: require("total", payload.total)?,
        status: payload.status.unwrap_or_else(|| "pending".to_string()),
        date: require_text("date", payload.date)?,
        created_at: utc_now(),
    };

    let repo = OrderRepository::new(state.store());
    let created = repo.create(order).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /orders/{id} - 更新订单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.store());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /orders/{id} - 删除订单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = OrderRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("order {id}")));
    }
    Ok(Json(OkResponse::new()))
}
