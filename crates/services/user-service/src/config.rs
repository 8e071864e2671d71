//! User service configuration.

use common::{env_parse, env_var, AppResult, DatabaseConfig, HttpClientConfig, JwtConfig, ServiceConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Base URL of the frontend, used in invitation links
    pub frontend_url: String,
    /// Pharmacy service internal API
    pub pharmacy: HttpClientConfig,
    pub smtp: SmtpConfig,
}

/// Outgoing mail relay.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// E-mails are only logged when unset
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
    /// STARTTLS; plain SMTP when false
    pub tls: bool,
}

impl SmtpConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_var(&["SMTP_HOST"]),
            port: env_parse(&["SMTP_PORT"], 587),
            user: env_var(&["SMTP_USER"]),
            pass: env_var(&["SMTP_PASS"]),
            from: env_var(&["SMTP_FROM"]).unwrap_or_else(|| "no-reply@pharmacy.local".to_string()),
            tls: env_var(&["SMTP_TLS"])
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            service: ServiceConfig::from_env("USER_SERVICE", "user-service", 8000),
            database: DatabaseConfig::from_env("USER_SERVICE", "sqlite://user.db?mode=rwc"),
            jwt: JwtConfig::from_env()?,
            frontend_url: env_var(&["FRONTEND_URL"])
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            pharmacy: HttpClientConfig::from_env(
                "PHARMACY_SERVICE",
                "PHARMACY_CLIENT_MOCK",
                "http://localhost:8002/api/pharmacies",
            ),
            smtp: SmtpConfig::from_env(),
        })
    }
}
