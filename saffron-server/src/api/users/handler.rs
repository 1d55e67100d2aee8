//! 用户 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::require_text;
use crate::utils::{AppError, AppResult, generate_id, time::utc_now};

/// 用户列表过滤条件
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub email: Option<String>,
}

/// GET /users - 获取所有用户
///
/// `email` 给定时按邮箱精确查找 (至多一条)。
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.store());
    let users = match query.email {
        Some(email) => repo.find_by_email(&email).await?.into_iter().collect(),
        None => repo.find_all().await?,
    };
    Ok(Json(users))
}

/// GET /users/{id} - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.store());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {id}")))?;
    Ok(Json(user))
}

/// POST /users - 创建用户
///
/// `id` 可选, 缺省时自动生成。`email` 重复时返回 409。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = User {
        id: payload.id.unwrap_or_else(generate_id),
        name: require_text("name", payload.name)?,
        email: require_text("email", payload.email)?,
        phone: payload.phone,
        created_at: utc_now(),
    };

    let repo = UserRepository::new(state.store());
    let created = repo.create(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /users/{id} - 更新用户
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.store());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /users/{id} - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = UserRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("user {id}")));
    }
    Ok(Json(OkResponse::new()))
}
