use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";
const DEFAULT_STORAGE_BACKEND: &str = "memory";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEV_DEFAULT_JWT_SECRET: &str =
    "development_only_jwt_secret_do_not_use_in_production_0123456789abcdef";

/// Application configuration, loaded from `config/*.toml` files layered with
/// `APP__`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AppConfig {
    /// Storage backend: "memory" or "database"
    #[serde(default = "default_storage_backend")]
    pub storage_backend: String,

    /// Database connection URL (required when storage_backend = "database")
    #[serde(default)]
    pub database_url: Option<String>,

    /// Whether to run migrations on startup (database backend only)
    #[serde(default)]
    pub auto_migrate: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment: "development", "test", or "production"
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// JWT secret used to sign login tokens
    #[validate(length(min = 32))]
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,

    /// CORS: comma-separated list of allowed origins
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Allow permissive CORS fallback outside development
    #[serde(default)]
    pub cors_allow_any_origin: bool,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// DB connect timeout (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
}

fn default_storage_backend() -> String {
    DEFAULT_STORAGE_BACKEND.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_jwt_secret() -> String {
    DEV_DEFAULT_JWT_SECRET.to_string()
}
fn default_jwt_expiration() -> u64 {
    86_400
}
fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_db_max_connections() -> u32 {
    10
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: default_storage_backend(),
            database_url: None,
            auto_migrate: false,
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            jwt_secret: default_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            cors_allowed_origins: None,
            cors_allow_any_origin: false,
            request_timeout_secs: default_request_timeout_secs(),
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development" || self.environment == "test"
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    /// Whether the permissive CORS fallback may be used when no explicit
    /// origins are configured.
    pub fn should_allow_permissive_cors(&self) -> bool {
        self.is_development() || self.cors_allow_any_origin
    }

    fn validate_semantics(&self) -> Result<(), ConfigLoadError> {
        if self.storage_backend != "memory" && self.storage_backend != "database" {
            return Err(ConfigLoadError::Invalid(format!(
                "storage_backend must be \"memory\" or \"database\", got {:?}",
                self.storage_backend
            )));
        }
        if self.storage_backend == "database" && self.database_url.is_none() {
            return Err(ConfigLoadError::Invalid(
                "database_url is required when storage_backend = \"database\"".to_string(),
            ));
        }
        if !self.is_development() && self.jwt_secret == DEV_DEFAULT_JWT_SECRET {
            return Err(ConfigLoadError::Invalid(
                "jwt_secret must be set explicitly outside development".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `config/default.toml`, an environment-specific
/// overlay, and `APP__`-prefixed environment variables (highest precedence).
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let mut builder = Config::builder();
    let default_file = format!("{CONFIG_DIR}/default");
    if Path::new(&format!("{default_file}.toml")).exists() {
        builder = builder.add_source(File::with_name(&default_file));
    }
    let env_file = format!("{CONFIG_DIR}/{run_env}");
    if Path::new(&format!("{env_file}.toml")).exists() {
        builder = builder.add_source(File::with_name(&env_file));
    }

    let settings = builder
        .add_source(Environment::with_prefix("APP").separator("__"))
        .set_default("environment", run_env)?
        .build()?;

    let cfg: AppConfig = settings.try_deserialize()?;
    cfg.validate()
        .map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;
    cfg.validate_semantics()?;
    Ok(cfg)
}

/// Initialise the global tracing subscriber. Safe to call once per process.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    info!(level = log_level, json, "tracing initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_memory_backend() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.storage_backend, "memory");
        assert!(cfg.validate_semantics().is_ok());
    }

    #[test]
    fn database_backend_requires_url() {
        let cfg = AppConfig {
            storage_backend: "database".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate_semantics().is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let cfg = AppConfig {
            storage_backend: "redis".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate_semantics().is_err());
    }

    #[test]
    fn production_rejects_development_jwt_secret() {
        let cfg = AppConfig {
            environment: "production".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate_semantics().is_err());
    }
}
