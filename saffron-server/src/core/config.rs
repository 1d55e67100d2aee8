/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (文档库、队列库) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | STORE_NS | saffron | 文档库命名空间 |
/// | STORE_DB_NAME | restaurant | 文档库数据库名 |
/// | QUEUE_DB_PATH | <WORK_DIR>/queue.db | 队列数据库路径 |
/// | LOG_DIR | (未设置) | 日志目录，设置后写入按日滚动的日志文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/saffron HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储文档库和队列库文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 文档库命名空间
    pub store_ns: String,
    /// 文档库数据库名
    pub store_db_name: String,
    /// 队列数据库路径
    pub queue_db_path: String,
    /// 日志目录 (可选)
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let queue_db_path =
            std::env::var("QUEUE_DB_PATH").unwrap_or_else(|_| format!("{work_dir}/queue.db"));

        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_ns: std::env::var("STORE_NS").unwrap_or_else(|_| "saffron".into()),
            store_db_name: std::env::var("STORE_DB_NAME").unwrap_or_else(|_| "restaurant".into()),
            queue_db_path,
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.queue_db_path = format!("{}/queue.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
