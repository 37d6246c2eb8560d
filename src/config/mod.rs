//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, JwtSettings, LogFormat, LoggingConfig, SeedConfig, ServerConfig,
    JWT_SECRET_ENV,
};
