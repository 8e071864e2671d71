//! Shared configuration structures.
//!
//! Every service reads `<SERVICE>_*` variables first and falls back to the
//! unprefixed, shared ones.

use std::env;

use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// First set variable among `keys`.
pub fn env_var(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env::var(key).ok())
}

/// First set variable among `keys` parsed as `T`, falling back to `default`.
pub fn env_parse<T: std::str::FromStr>(keys: &[&str], default: T) -> T {
    env_var(keys).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Boolean flag: "1", "true" and "yes" (any case) are true.
pub fn env_flag(keys: &[&str]) -> bool {
    env_var(keys)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    pub host: String,
    pub port: u16,
}

impl ServiceConfig {
    /// Read `<prefix>_HOST` and `<prefix>_PORT`.
    pub fn from_env(prefix: &str, service_name: &str, default_port: u16) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env_var(&[format!("{}_HOST", prefix).as_str()])
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env_parse(&[format!("{}_PORT", prefix).as_str()], default_port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read `<prefix>_DATABASE_URL` (or `DATABASE_URL`) and the pool sizes.
    pub fn from_env(prefix: &str, default_url: &str) -> Self {
        Self {
            url: env_var(&[format!("{}_DATABASE_URL", prefix).as_str(), "DATABASE_URL"])
                .unwrap_or_else(|| default_url.to_string()),
            max_connections: env_parse(&["DATABASE_MAX_CONNECTIONS"], 10),
            min_connections: env_parse(&["DATABASE_MIN_CONNECTIONS"], 1),
        }
    }

    /// Connection options for the pool.
    #[cfg(feature = "database")]
    pub fn connect_options(&self) -> sea_orm::ConnectOptions {
        let mut options = sea_orm::ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .sqlx_logging(false);
        options
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pharmacy.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// JWT configuration for authentication.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET_KEY` (required) and `JWT_EXPIRATION_HOURS`.
    pub fn from_env() -> AppResult<Self> {
        let secret = env_var(&["JWT_SECRET_KEY"])
            .ok_or_else(|| AppError::internal("JWT_SECRET_KEY must be set"))?;
        let config = Self {
            secret,
            expiration_hours: env_parse(&["JWT_EXPIRATION_HOURS"], DEFAULT_JWT_EXPIRATION_HOURS),
        };
        config.validate()?;
        Ok(config)
    }

    /// The secret must be at least 32 bytes.
    pub fn validate(&self) -> AppResult<()> {
        if self.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT secret must be at least {} bytes",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
        }
    }
}

/// Outbound HTTP client configuration for calls to another service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpClientConfig {
    /// Base URL, e.g. "http://localhost:8002/api/pharmacies"
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Use the in-process mock instead of calling the service
    pub mock: bool,
}

impl HttpClientConfig {
    /// Read `<prefix>_URL`, `<prefix>_API_KEY`, `<prefix>_TIMEOUT_MS` and
    /// `<mock_key>`.
    pub fn from_env(prefix: &str, mock_key: &str, default_url: &str) -> Self {
        Self {
            base_url: env_var(&[format!("{}_URL", prefix).as_str()])
                .unwrap_or_else(|| default_url.to_string()),
            api_key: env_var(&[format!("{}_API_KEY", prefix).as_str()]),
            request_timeout_ms: env_parse(&[format!("{}_TIMEOUT_MS", prefix).as_str()], 5000),
            mock: env_flag(&[mock_key]),
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            request_timeout_ms: 5000,
            mock: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        let config = JwtConfig {
            secret: "too-short".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JwtConfig {
            secret: "x".repeat(MIN_JWT_SECRET_LENGTH),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_parse_falls_back() {
        assert_eq!(env_parse(&["PHARMACY_TEST_UNSET_VARIABLE"], 42u16), 42);
        assert!(!env_flag(&["PHARMACY_TEST_UNSET_VARIABLE"]));
    }
}
