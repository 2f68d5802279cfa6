//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, EngineConfig, Environment,
    RateLimitConfig, ServerConfig, SnowflakeConfig,
};
