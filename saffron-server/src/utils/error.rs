//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`] 和错误响应结构 [`ErrorBody`]。
//!
//! # 错误码规范
//!
//! | HTTP | 错误码 | 说明 |
//! |------|--------|------|
//! | 400 | `<field>_required` | 缺少必填字段 |
//! | 400 | 具体校验码 | 请求数据非法 (如 `rating_invalid`) |
//! | 404 | `not_found` | 资源不存在 |
//! | 409 | `already_exists` | 资源冲突 |
//! | 500 | `database_error` | 数据库错误 |
//! | 500 | `internal_error` | 内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 缺少必填字段
//! Err(AppError::required("email"))
//!
//! // 资源不存在
//! Err(AppError::not_found(format!("user {id}")))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// 错误响应结构
///
/// ```json
/// { "error": "not_found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// 错误码
    pub error: String,
}

/// 应用错误枚举
///
/// # 错误分类
///
/// | 分类 | 说明 |
/// |------|------|
/// | 业务逻辑错误 | 缺少字段、验证失败、资源不存在、规则冲突 |
/// | 系统错误 | 数据库错误、内部错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Missing required field: {0}")]
    /// 缺少必填字段 (400)
    RequiredField(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            // Missing field (400): the code names the field
            AppError::RequiredField(field) => {
                (StatusCode::BAD_REQUEST, format!("{field}_required"))
            }

            // Validation (400): the code is the validation message itself
            AppError::Validation(code) => (StatusCode::BAD_REQUEST, code),

            // Not found (404): detail stays in Display, body is generic
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found".to_string()),

            // Conflict (409)
            AppError::Conflict(code) => (StatusCode::CONFLICT, code),

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody { error: code });
        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(_) => AppError::Conflict("already_exists".to_string()),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(e: surrealdb::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".to_string()),
            e => AppError::Database(e.to_string()),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// 缺少必填字段
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField(field.into())
    }

    /// 资源不存在
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    /// 资源冲突 (响应体为 `already_exists`)
    pub fn already_exists() -> Self {
        Self::Conflict("already_exists".to_string())
    }

    /// 数据库错误
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
