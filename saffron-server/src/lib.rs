//! Saffron Server - 餐厅运营管理后端
//!
//! # 架构概述
//!
//! 本模块是 Saffron 后端的主入口，提供以下核心功能：
//!
//! - **文档存储** (`db::store`): 嵌入式 SurrealDB, 存放用户/菜单/反馈/订单/预订
//! - **排队数据库** (`db::queue`): SQLite, 存放现场排队及其排位
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! saffron-server/src/
//! ├── core/      # 配置、状态、服务器
//! ├── api/       # HTTP 路由和处理器
//! ├── db/        # 数据库层 (文档存储 + 排队数据库)
//! ├── routes/    # Router 扩展 (oneshot 调用)
//! └── utils/     # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use routes::{OneshotResult, OneshotRouter};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 工作目录, 日志)
///
/// 在加载配置前读取 `.env`, 然后初始化日志输出。
/// `LOG_DIR` 设置时日志写入按天滚动的文件, 否则输出到 stdout。
pub fn setup_environment() -> std::io::Result<()> {
    // .env 不存在时静默跳过
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir()?;

    match config.log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            init_logger_with_file(Some(dir));
        }
        None => init_logger(),
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____       ____  ____
  / ___/____ _/ __/ / __/________  ____
  \__ \/ __ `/ /_  / /_ / ___/ __ \/ __ \
 ___/ / /_/ / __/ / __// /  / /_/ / / / /
/____/\__,_/_/   /_/  /_/   \____/_/ /_/
    "#
    );
}
