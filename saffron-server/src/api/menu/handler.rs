//! 菜单 API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::OkResponse;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{require, require_text};
use crate::utils::{AppError, AppResult, generate_id};

/// 菜品列表过滤条件
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuListQuery {
    pub category: Option<String>,
    pub is_veg: Option<bool>,
}

/// GET /menu - 获取菜品列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.store());
    let items = repo.find_all(query.category, query.is_veg).await?;
    Ok(Json(items))
}

/// GET /menu/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.store());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("menu item {id}")))?;
    Ok(Json(item))
}

/// POST /menu - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let item = MenuItem {
        id: payload.id.unwrap_or_else(generate_id),
        name: require_text("name", payload.name)?,
        category: require_text("category", payload.category)?,
        price: require("price", payload.price)?,
        is_veg: payload.is_veg.unwrap_or(false),
        description: payload.description,
        available: payload.available.unwrap_or(true),
    };

    let repo = MenuItemRepository::new(state.store());
    let created = repo.create(item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /menu/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.store());
    let updated = repo.update(&id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /menu/{id} - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let repo = MenuItemRepository::new(state.store());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("menu item {id}")));
    }
    Ok(Json(OkResponse::new()))
}
