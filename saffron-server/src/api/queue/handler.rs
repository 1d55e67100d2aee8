//! 现场排队 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{NewQueueEntry, QueueEntry, QueueEntryPatch, QueueJoin, QueueList};
use crate::db::repository::queue;
use crate::utils::validation::require;
use crate::utils::{AppError, AppResult};

/// 排队列表过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueListQuery {
    pub queue_date: Option<String>,
}

/// GET /queue - 获取排队列表
///
/// 排序: queueDate 降序, hall 升序, segment 升序, position 升序。
/// `queueDate` 为空字符串时视同未过滤。
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<QueueListQuery>,
) -> AppResult<Json<QueueList>> {
    let date = query.queue_date.as_deref().filter(|d| !d.is_empty());
    let entries = queue::find_all(state.queue(), date).await?;
    Ok(Json(QueueList { entries }))
}

/// POST /queue/join - 加入排队
///
/// 必填字段按固定顺序校验, 返回第一个缺失字段的 `<field>_required`。
/// 只检查字段是否出现, 空字符串和 0 视为有效值。
pub async fn join(
    State(state): State<ServerState>,
    Json(payload): Json<QueueJoin>,
) -> AppResult<(StatusCode, Json<QueueEntry>)> {
    let data = NewQueueEntry {
        id: require("id", payload.id)?,
        name: require("name", payload.name)?,
        guests: require("guests", payload.guests)?,
        notification_method: require("notificationMethod", payload.notification_method)?,
        contact: require("contact", payload.contact)?,
        hall: require("hall", payload.hall)?,
        segment: require("segment", payload.segment)?,
        queue_date: require("queueDate", payload.queue_date)?,
        notified_at_5_min: payload.notified_at_5_min.unwrap_or(false),
    };

    let entry = queue::join(state.queue(), data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /queue/{id} - 更新通知状态 / 等待时间
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<QueueEntryPatch>,
) -> AppResult<Json<QueueEntry>> {
    let entry = queue::update(state.queue(), &id, payload)
        .await?
        .ok_or_else(|| AppError::not_found(format!("queue entry {id}")))?;
    Ok(Json(entry))
}

/// DELETE /queue/{id} - 取消排队
///
/// 删除后同组其余顾客按加入顺序重排为 1..N, 等待时间同步更新。
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    if !queue::cancel(state.queue(), &id).await? {
        return Err(AppError::not_found(format!("queue entry {id}")));
    }
    Ok(Json(OkResponse::new()))
}
