//! Repository Module
//!
//! CRUD operations over the document store (SurrealDB) and the walk-in
//! queue (SQLite).

pub mod feedback;
pub mod menu_item;
pub mod order;
pub mod queue;
pub mod reservation;
pub mod user;
pub mod waiting;

// Re-exports
pub use feedback::FeedbackRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;
pub use waiting::WaitingRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::Store;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 文档集合的 record id 就是应用层 id
// =============================================================================
//
// 写入: INSERT INTO <table> $data, content 里的 `id` 字符串成为 record key
// 读取: SELECT record::id(id) AS id, ... 把 record key 还原成裸字符串
// 定位: type::thing('<table>', $id), 任意字符串 id 都安全

/// Base repository with store reference
#[derive(Debug, Clone)]
pub struct BaseRepository {
    store: Store,
}

impl BaseRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn db(&self) -> &Surreal<Db> {
        self.store.db()
    }

    /// Lazy index bootstrap for `table`
    pub async fn ensure_indexes(&self, table: &str) -> RepoResult<()> {
        self.store.ensure_indexes(table).await?;
        Ok(())
    }
}
