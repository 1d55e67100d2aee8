//! 反馈 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate, FeedbackUpdate};
use crate::db::repository::FeedbackRepository;
use crate::utils::validation::{require, require_text};
use crate::utils::{AppError, AppResult, generate_id, time::utc_now};

/// 评分取值范围
const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// 反馈列表过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListQuery {
    pub user_id: Option<String>,
    pub order_id: Option<String>,
}

/// GET /feedback - 获取反馈列表, 按创建时间倒序
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<FeedbackListQuery>,
) -> AppResult<Json<Vec<Feedback>>> {
    let repo = FeedbackRepository::new(state.store());
    let entries = repo.find_all(query.user_id, query.order_id).await?;
    Ok(Json(entries))
}

/// GET /feedback/{id} - 获取单条反馈
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Feedback>> {
    let repo = FeedbackRepository::new(state.store());
    let entry = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("feedback {id}")))?;
    Ok(Json(entry))
}

/// POST /feedback - 提交反馈
///
/// `rating` 必须在 1..=5 范围内, 否则返回 400 `rating_invalid`。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let rating = require("rating", payload.rating)?;
    if !RATING_RANGE.contains(&rating) {
        return Err(AppError::Validation("rating_invalid".to_string()));
    }

    let entry = Feedback {
        id: payload.id.unwrap_or_else(generate_id),
        user_id: require_text("userId", payload.user_id)?,
        order_id: payload.order_id,
        rating,
        comment: payload.comment,
        created_at: utc_now(),
    };

    let repo = FeedbackRepository::new(state.store());
    let created = repo.create(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /feedback/{id} - 更新反馈
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FeedbackUpdate>,
) -> AppResult<Json<Feedback>> {
    if let Some(rating) = payload.rating
        && !RATING_RANGE.contains(&rating)
    {
        return Err(AppError::Validation("rating_invalid".to_string()));
    }

    let repo = FeedbackRepository::new(state.store());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /feedback/{id} - 删除反馈
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = FeedbackRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("feedback {id}")));
    }
    Ok(Json(OkResponse::new()))
}
