use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/local.yaml";

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "students-api", version, about = "Student records HTTP service")]
pub struct Cli {
    /// 配置文件路径，`CONFIG_PATH` 环境变量优先
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl Cli {
    /// 解析最终使用的配置文件路径
    pub fn config_path(&self) -> PathBuf {
        resolve_config_path(std::env::var("CONFIG_PATH").ok(), &self.config)
    }
}

/// 非空的 `CONFIG_PATH` 覆盖命令行参数
pub fn resolve_config_path(env_path: Option<String>, flag: &Path) -> PathBuf {
    match env_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => flag.to_path_buf(),
    }
}

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 运行环境，可被 `ENV` 环境变量覆盖
    pub env: String,
    /// SQLite 数据库文件路径
    pub storage_path: PathBuf,
    pub http_server: HttpServerConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// 监听地址
    pub address: String,
    /// 单个请求超时时间（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 优雅关闭的最长等待时间（秒）
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_shutdown_timeout_secs() -> u64 {
    5
}

impl HttpServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        if let Ok(env) = std::env::var("ENV") {
            if !env.is_empty() {
                self.env = env;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.env.trim().is_empty() {
            return Err(ConfigError::Validation("env must not be empty".to_string()));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage_path must not be empty".to_string(),
            ));
        }
        if self.http_server.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http_server.address must not be empty".to_string(),
            ));
        }
        if self.http_server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http_server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    NotFound(String),
    #[error("can not read config file: {0}")]
    FileRead(String),
    #[error("can not parse config file: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// 加载、覆盖并校验配置
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::load_from_file(path)?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
