//! 反馈 API 模块
//!
//! 提供顾客反馈的 CRUD 操作:
//! - `GET /feedback` - 获取反馈列表 (支持 `userId` / `orderId` 过滤)
//! - `GET /feedback/{id}` - 获取单条反馈
//! - `POST /feedback` - 提交反馈
//! - `PATCH /feedback/{id}` - 更新反馈
//! - `DELETE /feedback/{id}` - 删除反馈

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/feedback", routes())
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
