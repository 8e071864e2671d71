//! Pharmacy service configuration.

use common::{env_var, AppResult, DatabaseConfig, HttpClientConfig, JwtConfig, ServiceConfig};

/// Pharmacy service configuration.
#[derive(Debug, Clone)]
pub struct PharmacyServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Medication service catalogue API
    pub medication: HttpClientConfig,
    /// Keys accepted on the `/internal` routes
    pub internal_api_keys: Vec<String>,
}

impl PharmacyServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            service: ServiceConfig::from_env("PHARMACY_SERVICE", "pharmacy-service", 8002),
            database: DatabaseConfig::from_env("PHARMACY_SERVICE", "sqlite://pharmacy.db?mode=rwc"),
            jwt: JwtConfig::from_env()?,
            medication: HttpClientConfig::from_env(
                "MEDICATION_SERVICE",
                "MEDICATION_CLIENT_MOCK",
                "http://localhost:8001/api",
            ),
            internal_api_keys: parse_keys(env_var(&["INTERNAL_API_KEYS"]).as_deref()),
        })
    }
}

/// Split a comma separated key list, dropping blanks.
pub fn parse_keys(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
