//! # students-api
//!
//! 学生记录的 CRUD HTTP 服务：
//! - `app`：路由、处理器、数据模型、请求校验与存储接口
//! - `core`：统一错误类型、响应信封、请求日志中间件
//! - `infrastructure`：SQLite 与内存存储实现、日志初始化
//! - `config`：YAML 配置与命令行参数

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::build_router;
pub use config::{Config, ConfigError};
