//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户管理接口
//! - [`menu`] - 菜单管理接口
//! - [`feedback`] - 反馈管理接口
//! - [`orders`] - 订单管理接口
//! - [`reservations`] - 预订管理接口 (含候补名单)
//! - [`queue`] - 现场排队接口

pub mod health;

// Data models API
pub mod feedback;
pub mod menu;
pub mod orders;
pub mod queue;
pub mod reservations;
pub mod users;

use serde::Serialize;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 删除操作的确认响应
///
/// ```json
/// { "ok": true }
/// ```
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
