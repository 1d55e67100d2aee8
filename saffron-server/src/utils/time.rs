//! 时间工具函数
//!
//! 文档时间戳统一使用 UTC ISO-8601 字符串 (`Z` 后缀)，
//! 队列条目的 `joined_at` 使用 `NaiveDateTime` (UTC)。

use chrono::{DurationRound, NaiveDateTime, SecondsFormat, TimeDelta, Utc};

/// 当前 UTC 时间戳字符串 (ISO-8601, 微秒精度)
///
/// 例: `2026-08-23T10:15:30.123456Z`
pub fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 当前 UTC 时间 (naive, 截断到微秒)
pub fn utc_now_naive() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    // 纳秒部分不进入序列化格式, 直接截断
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}
