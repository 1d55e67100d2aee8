//! 预订 API 模块
//!
//! 提供预订的 CRUD 操作和候补名单:
//! - `GET /reservations` - 获取预订列表 (支持 `userId` / `date` / `timeSlot` 过滤)
//! - `GET /reservations/{id}` - 获取单个预订
//! - `POST /reservations` - 创建预订
//! - `PATCH /reservations/{id}` - 更新预订
//! - `DELETE /reservations/{id}` - 取消预订
//! - `GET /reservations/waiting` - 获取候补名单
//! - `POST /reservations/waiting` - 加入候补名单
//! - `DELETE /reservations/waiting/{id}` - 退出候补名单

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // 静态段 /waiting 必须先于 /{id} 注册
        .route(
            "/waiting",
            get(handler::waiting_list).post(handler::waiting_join),
        )
        .route("/waiting/{id}", delete(handler::waiting_leave))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
