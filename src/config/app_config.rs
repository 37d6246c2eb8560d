use serde::Deserialize;

use crate::infrastructure::auth::{DEFAULT_AUDIENCE, DEFAULT_EXPIRATION_MINUTES, DEFAULT_ISSUER};
use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::user::PasswordHasherKind;

/// Environment variable consulted when `jwt.secret_key` is not configured
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub jwt: JwtSettings,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing settings. The secret has no default.
#[derive(Clone, Deserialize)]
pub struct JwtSettings {
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: u64,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[hidden]"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl JwtSettings {
    /// Configured secret, falling back to the `JWT_SECRET` environment variable
    pub fn resolve_secret(&self) -> Option<String> {
        self.secret_or(std::env::var(JWT_SECRET_ENV).ok())
    }

    fn secret_or(&self, fallback: Option<String>) -> Option<String> {
        self.secret_key
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| fallback.filter(|s| !s.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub password_hasher: PasswordHasherKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Seed the demo users and products at startup
    #[serde(default = "default_true")]
    pub demo_data: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

fn default_expiration_minutes() -> u64 {
    DEFAULT_EXPIRATION_MINUTES
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret_key: None,
            issuer: default_issuer(),
            audience: default_audience(),
            expiration_minutes: default_expiration_minutes(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo_data: default_true(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
