//! Embedded document store (SurrealDB over RocksDB)
//!
//! 持有六个文档集合。索引在每个集合第一次被访问时定义，
//! `IF NOT EXISTS` 保证重复定义是幂等的。

use std::path::Path;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tokio::sync::OnceCell;

use crate::utils::AppError;

// ========== Collection names ==========

pub const USERS: &str = "users";
pub const MENU_ITEMS: &str = "menu_items";
pub const FEEDBACK: &str = "feedback";
pub const ORDERS: &str = "orders";
pub const RESERVATIONS: &str = "reservations";
pub const WAITING_QUEUE: &str = "reservation_waiting_queue";

// ========== Index definitions ==========
//
// 唯一字段: users.email (其余集合以 record id 为唯一键)

const USERS_INDEXES: &[&str] =
    &["DEFINE INDEX IF NOT EXISTS idx_users_email ON users FIELDS email UNIQUE"];

const MENU_ITEMS_INDEXES: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_menu_items_category ON menu_items FIELDS category",
    "DEFINE INDEX IF NOT EXISTS idx_menu_items_is_veg ON menu_items FIELDS isVeg",
];

const FEEDBACK_INDEXES: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_feedback_user_id ON feedback FIELDS userId",
    "DEFINE INDEX IF NOT EXISTS idx_feedback_order_id ON feedback FIELDS orderId",
    "DEFINE INDEX IF NOT EXISTS idx_feedback_created_at ON feedback FIELDS createdAt",
];

const ORDERS_INDEXES: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_orders_user_id ON orders FIELDS userId",
    "DEFINE INDEX IF NOT EXISTS idx_orders_date ON orders FIELDS date",
];

const RESERVATIONS_INDEXES: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_reservations_user_id ON reservations FIELDS userId",
    "DEFINE INDEX IF NOT EXISTS idx_reservations_date ON reservations FIELDS date",
    "DEFINE INDEX IF NOT EXISTS idx_reservations_time_slot ON reservations FIELDS timeSlot",
];

const WAITING_QUEUE_INDEXES: &[&str] = &[
    "DEFINE INDEX IF NOT EXISTS idx_waiting_user_id ON reservation_waiting_queue FIELDS userId",
    "DEFINE INDEX IF NOT EXISTS idx_waiting_date ON reservation_waiting_queue FIELDS date",
    "DEFINE INDEX IF NOT EXISTS idx_waiting_time_slot ON reservation_waiting_queue FIELDS timeSlot",
];

/// Tracks which collections already had their indexes defined
#[derive(Debug, Default)]
struct SchemaState {
    users: OnceCell<()>,
    menu_items: OnceCell<()>,
    feedback: OnceCell<()>,
    orders: OnceCell<()>,
    reservations: OnceCell<()>,
    waiting_queue: OnceCell<()>,
}

/// Document store handle
///
/// Cheap to clone; the schema state is shared so index bootstrap runs
/// at most once per collection per store.
#[derive(Debug, Clone)]
pub struct Store {
    db: Surreal<Db>,
    schema: Arc<SchemaState>,
}

impl Store {
    /// Open the embedded store under `dir` and select the configured
    /// namespace and database.
    pub async fn open(dir: &Path, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(dir.join("store"))
            .await
            .map_err(|e| AppError::database(format!("Failed to open document store: {e}")))?;
        db.use_ns(namespace).use_db(database).await.map_err(|e| {
            AppError::database(format!("Failed to select {namespace}/{database}: {e}"))
        })?;

        Ok(Self {
            db,
            schema: Arc::new(SchemaState::default()),
        })
    }

    /// Raw database handle
    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Define indexes for a collection on first access
    ///
    /// Concurrent callers block on the same cell, so the DEFINE
    /// statements run once per store instance.
    pub async fn ensure_indexes(&self, table: &str) -> Result<(), surrealdb::Error> {
        let (cell, statements) = match table {
            USERS => (&self.schema.users, USERS_INDEXES),
            MENU_ITEMS => (&self.schema.menu_items, MENU_ITEMS_INDEXES),
            FEEDBACK => (&self.schema.feedback, FEEDBACK_INDEXES),
            ORDERS => (&self.schema.orders, ORDERS_INDEXES),
            RESERVATIONS => (&self.schema.reservations, RESERVATIONS_INDEXES),
            WAITING_QUEUE => (&self.schema.waiting_queue, WAITING_QUEUE_INDEXES),
            _ => return Ok(()),
        };

        cell.get_or_try_init(|| async {
            for statement in statements {
                self.db.query(*statement).await?.check()?;
            }
            tracing::debug!(target: "store", "Indexes ready for {table}");
            Ok(())
        })
        .await?;

        Ok(())
    }
}
