//! 订单 API 模块
//!
//! 提供订单的 CRUD 操作:
//! - `GET /orders` - 获取订单列表 (支持 `userId` / `date` 过滤)
//! - `GET /orders/{id}` - 获取单个订单
//! - `POST /orders` - 创建订单
//! - `PATCH /orders/{id}` - 更新订单
//! - `DELETE /orders/{id}` - 删除订单

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", routes())
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
