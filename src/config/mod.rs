use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Longest accepted `JWT_EXPIRES_IN`.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(366 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub auto_migrate: bool,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub manager_password: String,
    pub jwt_secret: String,
    pub jwt_expiry: Duration,
    /// `*` allows any origin.
    pub cors_origin: String,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("manager_password", &"[redacted]")
            .field("jwt_secret", &"[redacted]")
            .field("jwt_expiry", &self.jwt_expiry)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let mut config = Self::preset(
            environment,
            required("DATABASE_URL")?,
            SecurityConfig {
                manager_password: required("MANAGER_PASSWORD")?,
                jwt_secret: required("JWT_SECRET")?,
                jwt_expiry: Duration::from_secs(8 * 60 * 60),
                cors_origin: "*".to_string(),
            },
        );

        // Security overrides
        if let Some(v) = get("JWT_EXPIRES_IN") {
            config.security.jwt_expiry = parse_duration(&v)
                .filter(|ttl| *ttl <= MAX_TOKEN_LIFETIME)
                .ok_or(ConfigError::Invalid {
                    key: "JWT_EXPIRES_IN",
                    value: v,
                })?;
        }
        if let Some(v) = get("FRONTEND_ORIGIN") {
            config.security.cors_origin = v.trim().to_string();
        }

        // API overrides
        if let Some(v) = get("PORT") {
            config.api.port = parse_value("PORT", v)?;
        }
        if let Some(v) = get("UPLOAD_DIR") {
            config.api.upload_dir = PathBuf::from(v);
        }
        if let Some(v) = get("API_MAX_REQUEST_SIZE_BYTES") {
            config.api.max_request_size_bytes = parse_value("API_MAX_REQUEST_SIZE_BYTES", v)?;
        }
        if let Some(v) = get("API_ENABLE_REQUEST_LOGGING") {
            config.api.enable_request_logging = parse_value("API_ENABLE_REQUEST_LOGGING", v)?;
        }

        // Database overrides
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = parse_value("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = get("DATABASE_CONNECTION_TIMEOUT") {
            config.database.connection_timeout = parse_value("DATABASE_CONNECTION_TIMEOUT", v)?;
        }
        if let Some(v) = get("DATABASE_AUTO_MIGRATE") {
            config.database.auto_migrate = parse_value("DATABASE_AUTO_MIGRATE", v)?;
        }

        Ok(config)
    }

    fn preset(environment: Environment, database_url: String, security: SecurityConfig) -> Self {
        let (max_connections, connection_timeout, enable_request_logging, max_request_size_bytes) =
            match environment {
                Environment::Development => (10, 30, true, 10 * 1024 * 1024), // 10MB
                Environment::Staging => (20, 10, true, 5 * 1024 * 1024),      // 5MB
                Environment::Production => (50, 5, false, 5 * 1024 * 1024),   // 5MB
            };

        Self {
            environment,
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                connection_timeout,
                auto_migrate: true,
            },
            api: ApiConfig {
                port: 5000,
                upload_dir: PathBuf::from("uploads"),
                enable_request_logging,
                max_request_size_bytes,
            },
            security,
        }
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

/// Parse a token lifetime: bare seconds (`3600`) or a number with an `s`, `m`, `h` or `d` suffix.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: u64 = digits.parse().ok()?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    amount.checked_mul(multiplier).map(Duration::from_secs)
}
