//! 预订 API Handlers
//!
//! 包含预订 CRUD 和候补名单 (waiting list) 两组接口。
//! 候补名单只支持加入/查看/退出, 不支持修改。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{
    Reservation, ReservationCreate, ReservationUpdate, WaitingEntry, WaitingJoin,
};
use crate::db::repository::{ReservationRepository, WaitingRepository};
use crate::utils::validation::{require_count, require_text};
use crate::utils::{AppError, AppResult, generate_id, time::utc_now};

/// 预订列表过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
}

/// 候补名单过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListQuery {
    pub date: Option<String>,
    pub time_slot: Option<String>,
}

// ========== 预订 ==========

/// GET /reservations - 获取预订列表, 按日期和时段升序
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = ReservationRepository::new(state.store());
    let reservations = repo
        .find_all(query.user_id, query.date, query.time_slot)
        .await?;
    Ok(Json(reservations))
}

/// GET /reservations/{id} - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.store());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("reservation {id}")))?;
    Ok(Json(reservation))
}

/// POST /reservations - 创建预订
///
/// `status` 缺省为 `confirmed`。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = Reservation {
        reservation_id: payload.reservation_id.unwrap_or_else(generate_id),
        user_id: require_text("userId", payload.user_id)?,
        name: require_text("name", payload.name)?,
        guests: require_count("guests", payload.guests)?,
        date: require_text("date", payload.date)?,
        time_slot: require_text("timeSlot", payload.time_slot)?,
        table_number: payload.table_number,
        status: payload.status.unwrap_or_else(|| "confirmed".to_string()),
        created_at: utc_now(),
    };

    let repo = ReservationRepository::new(state.store());
    let created = repo.create(reservation).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /reservations/{id} - 更新预订
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.store());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /reservations/{id} - 取消预订
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = ReservationRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("reservation {id}")));
    }
    Ok(Json(OkResponse::new()))
}

// ========== 候补名单 ==========

/// GET /reservations/waiting - 获取候补名单, 按加入时间升序
pub async fn waiting_list(
    State(state): State<ServerState>,
    Query(query): Query<WaitingListQuery>,
) -> AppResult<Json<Vec<WaitingEntry>>> {
    let repo = WaitingRepository::new(state.store());
    let entries = repo.find_all(query.date, query.time_slot).await?;
    Ok(Json(entries))
}

/// POST /reservations/waiting - 加入候补名单
pub async fn waiting_join(
    State(state): State<ServerState>,
    Json(payload): Json<WaitingJoin>,
) -> AppResult<(StatusCode, Json<WaitingEntry>)> {
    let entry = WaitingEntry {
        queue_id: payload.queue_id.unwrap_or_else(generate_id),
        user_id: require_text("userId", payload.user_id)?,
        name: require_text("name", payload.name)?,
        guests: require_count("guests", payload.guests)?,
        date: require_text("date", payload.date)?,
        time_slot: require_text("timeSlot", payload.time_slot)?,
        created_at: utc_now(),
    };

    let repo = WaitingRepository::new(state.store());
    let created = repo.create(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /reservations/waiting/{id} - 退出候补名单
pub async fn waiting_leave(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = WaitingRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("waiting entry {id}")));
    }
    Ok(Json(OkResponse::new()))
}
