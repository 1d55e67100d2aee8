//! Database Module
//!
//! 两套存储引擎：
//! - [`store`] - SurrealDB (RocksDB 嵌入式)，文档集合
//! - [`queue`] - SQLite (sqlx)，排队表 queue_entry

pub mod models;
pub mod queue;
pub mod repository;
pub mod store;

use std::path::Path;

use sqlx::SqlitePool;

use crate::utils::AppError;

pub use store::Store;

/// Database service, owns both storage engines
#[derive(Debug, Clone)]
pub struct DbService {
    pub store: Store,
    pub queue: SqlitePool,
}

impl DbService {
    /// Open the document store and the queue database
    pub async fn new(
        work_dir: &Path,
        namespace: &str,
        database: &str,
        queue_db_path: &str,
    ) -> Result<Self, AppError> {
        let store = Store::open(work_dir, namespace, database).await?;
        tracing::info!("Document store opened ({namespace}/{database})");

        let queue = queue::open(queue_db_path).await?;
        tracing::info!("Queue database ready (SQLite WAL, busy_timeout=5000ms)");

        Ok(Self { store, queue })
    }
}
