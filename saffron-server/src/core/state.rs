//! 服务器状态

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::{DbService, Store};
use crate::utils::AppError;

/// 服务器状态 - 持有配置与两套存储的共享引用
///
/// Clone 是浅拷贝，所有 handler 共享同一组连接。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | 文档库 + 队列库 |
#[derive(Debug, Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 文档库 (work_dir/store) 和队列库 (queue_db_path)
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db = DbService::new(
            &PathBuf::from(&config.work_dir),
            &config.store_ns,
            &config.store_db_name,
            &config.queue_db_path,
        )
        .await?;

        Ok(Self {
            config: config.clone(),
            db,
        })
    }

    /// 文档库句柄
    pub fn store(&self) -> Store {
        self.db.store.clone()
    }

    /// 队列库连接池
    pub fn queue(&self) -> &SqlitePool {
        &self.db.queue
    }
}
