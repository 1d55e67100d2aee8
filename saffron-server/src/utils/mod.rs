//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型
//! - [`logger`] - 日志初始化
//! - [`validation`] - 请求字段校验
//! - [`time`] - UTC 时间戳工具

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody};
pub use result::AppResult;

/// 生成随机记录 id (32 位十六进制, 无连字符)
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
