//! 用户 API 模块
//!
//! 提供用户的 CRUD 操作:
//! - `GET /users` - 获取所有用户 (支持 `email` 精确查找)
//! - `GET /users/{id}` - 获取单个用户
//! - `POST /users` - 创建用户
//! - `PATCH /users/{id}` - 更新用户
//! - `DELETE /users/{id}` - 删除用户

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
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
