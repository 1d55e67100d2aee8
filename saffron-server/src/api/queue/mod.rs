//! 现场排队 API 模块
//!
//! 到店排队 (walk-in queue), 与候补名单不同, 按分组计算排位:
//! 同一 (queueDate, guests, hall, segment) 为一组, 组内按加入顺序排位,
//! 预计等待时间 = 排位 x 60 分钟。
//!
//! - `GET /queue` - 获取排队列表 (支持 `queueDate` 过滤)
//! - `POST /queue/join` - 加入排队
//! - `PATCH /queue/{id}` - 更新通知状态 / 等待时间
//! - `DELETE /queue/{id}` - 取消排队并重排同组

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/queue", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/join", post(handler::join))
        .route("/{id}", patch(handler::update).delete(handler::cancel))
}
