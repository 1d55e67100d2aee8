//! 健康检查 API
//!
//! - `GET /health` - 基本健康检查 (进程存活)
//! - `GET /health/detailed` - 详细健康检查 (含存储连通性)

use std::sync::OnceLock;
use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

/// 服务启动时间, 用于计算 uptime
static START_TIME: OnceLock<Instant> = OnceLock::new();

pub fn router() -> Router<ServerState> {
    // 记录启动时间
    START_TIME.get_or_init(Instant::now);

    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

/// 基本健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 详细健康检查响应
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

/// 各项子系统检查结果
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    /// 文档存储 (SurrealDB)
    pub store: CheckResult,
    /// 排队数据库 (SQLite)
    pub queue: CheckResult,
}

/// 单项检查结果
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    fn ok_with_latency(start: Instant) -> Self {
        Self {
            ok: true,
            latency_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            latency_ms: None,
            error: Some(message.into()),
        }
    }
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health/detailed
async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let store = check_store(&state).await;
    let queue = check_queue(&state).await;

    let status = if store.ok && queue.ok {
        "healthy"
    } else {
        "degraded"
    };

    let uptime_seconds = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    Json(DetailedHealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds,
        checks: HealthChecks { store, queue },
    })
}

/// 检查文档存储连通性
async fn check_store(state: &ServerState) -> CheckResult {
    let start = Instant::now();
    match state.store().db().query("RETURN 1").await {
        Ok(_) => CheckResult::ok_with_latency(start),
        Err(e) => CheckResult::error(e.to_string()),
    }
}

/// 检查排队数据库连通性
async fn check_queue(state: &ServerState) -> CheckResult {
    let start = Instant::now();
    match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(state.queue())
        .await
    {
        Ok(_) => CheckResult::ok_with_latency(start),
        Err(e) => CheckResult::error(e.to_string()),
    }
}
