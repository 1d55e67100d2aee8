//! 菜单 API 模块
//!
//! 提供菜品的 CRUD 操作:
//! - `GET /menu` - 获取菜品列表 (支持 `category` / `isVeg` 过滤)
//! - `GET /menu/{id}` - 获取单个菜品
//! - `POST /menu` - 创建菜品
//! - `PATCH /menu/{id}` - 更新菜品
//! - `DELETE /menu/{id}` - 删除菜品

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
