//! 应用配置管理模块
//!
//! 统一管理应用的所有配置，支持从环境变量和配置文件加载配置

use figment::{
    providers::{Env, Format, Toml},
    Error as FigmentError, Figment,
};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// 配置加载错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载错误: {0}")]
    Loading(#[from] FigmentError),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 服务器配置
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub graceful_shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            graceful_shutdown_timeout_seconds: 5,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 安全配置
#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub cors_allow_origins: Vec<String>,
    /// 会话令牌长度
    pub session_token_length: usize,
    /// 请求体大小上限（字节）
    pub max_request_bytes: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_allow_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            session_token_length: 32,
            max_request_bytes: 64 * 1024,
        }
    }
}

/// 展示配置
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// 全站统一的货币代码，历史数据里混用符号属于编码事故，不保留
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
        }
    }
}

/// 演示账号配置
///
/// 两类角色各一个演示账号，没有真实的认证后端。
#[derive(Debug, Deserialize, Clone)]
pub struct DemoAccounts {
    pub admin_email: String,
    pub admin_password: String,
    pub member_email: String,
    pub member_password: String,
}

impl Default for DemoAccounts {
    fn default() -> Self {
        Self {
            admin_email: "admin@demo.com".to_string(),
            admin_password: "demo123".to_string(),
            member_email: "member@demo.com".to_string(),
            member_password: "demo123".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub display: DisplayConfig,
    pub demo: DemoAccounts,
    pub log_level: String,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            display: DisplayConfig::default(),
            demo: DemoAccounts::default(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// 从默认位置加载配置
    pub fn load() -> Result<Self, ConfigError> {
        // 配置文件搜索路径
        let config_paths = [
            PathBuf::from("./config.toml"),
            PathBuf::from("../config.toml"),
            PathBuf::from("./config/config.toml"),
        ];

        let mut figment = Figment::new();

        // 只加载第一个存在的配置文件
        for path in config_paths {
            if path.exists() {
                tracing::info!("从配置文件加载: {}", path.display());
                figment = figment.merge(Toml::file(path));
                break;
            }
        }

        // 环境变量优先级最高
        figment = figment.merge(Env::prefixed("APP_").split("."));

        let config: AppConfig = figment.extract()?;
        config.validate()?;

        Ok(config)
    }

    /// 验证配置
    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(
            self.environment.to_lowercase().as_str(),
            "development" | "staging" | "production"
        ) {
            return Err(ConfigError::Validation(
                "环境必须是 development、staging 或 production".to_string(),
            ));
        }

        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::Validation(
                "日志级别必须是 error、warn、info、debug 或 trace".to_string(),
            ));
        }

        if self.display.currency.trim().is_empty() {
            return Err(ConfigError::Validation("货币代码不能为空".to_string()));
        }

        if self.demo.admin_email.trim().is_empty()
            || self.demo.admin_password.is_empty()
            || self.demo.member_email.trim().is_empty()
            || self.demo.member_password.is_empty()
        {
            return Err(ConfigError::Validation(
                "演示账号的邮箱和密码不能为空".to_string(),
            ));
        }

        if self.security.session_token_length < 16 {
            return Err(ConfigError::Validation(
                "会话令牌长度不能小于 16".to_string(),
            ));
        }

        Ok(())
    }

    /// 是否为生产环境
    #[allow(dead_code)]
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

// 提供一个全局配置实例的访问方式
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::load()
        .unwrap_or_else(|e| {
            eprintln!("警告: 无法加载配置: {}. 使用默认配置.", e);
            AppConfig::default()
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.server_addr(), "127.0.0.1:3000");
        assert_eq!(config.display.currency, "INR");
    }

    #[test]
    fn rejects_unknown_environment() {
        let config = AppConfig {
            environment: "testing".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_currency() {
        let mut config = AppConfig::default();
        config.display.currency = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_short_session_tokens() {
        let mut config = AppConfig::default();
        config.security.session_token_length = 8;
        assert!(config.validate().is_err());
    }
}
