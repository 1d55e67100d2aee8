//! Data Models
//!
//! 数据模型定义：
//! - 文档集合 (SurrealDB): users, menu_items, feedback, orders,
//!   reservations, reservation_waiting_queue
//! - 排队表 (SQLite): queue_entry
//!
//! 所有 wire 格式统一 camelCase。

pub mod feedback;
pub mod menu_item;
pub mod order;
pub mod queue_entry;
pub mod reservation;
pub mod user;
pub mod waiting;

pub use feedback::{Feedback, FeedbackCreate, FeedbackUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderCreate, OrderItem, OrderUpdate};
pub use queue_entry::{NewQueueEntry, QueueEntry, QueueEntryPatch, QueueJoin, QueueList};
pub use reservation::{Reservation, ReservationCreate, ReservationUpdate};
pub use user::{User, UserCreate, UserUpdate};
pub use waiting::{WaitingEntry, WaitingJoin};
