//! Router 扩展
//!
//! 提供不经过网络栈直接调用 Router 的能力, 主要用于集成测试。

pub mod router_ext;

pub use router_ext::{OneshotResult, OneshotRouter};
