//! Medication service configuration.

use std::path::PathBuf;

use common::{env_var, AppResult, DatabaseConfig, JwtConfig, ServiceConfig};

/// Medication service configuration.
#[derive(Debug, Clone)]
pub struct MedicationServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Directory holding uploaded images, served under `/media`
    pub media_dir: PathBuf,
}

impl MedicationServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            service: ServiceConfig::from_env("MEDICATION_SERVICE", "medication-service", 8001),
            database: DatabaseConfig::from_env(
                "MEDICATION_SERVICE",
                "sqlite://medication.db?mode=rwc",
            ),
            jwt: JwtConfig::from_env()?,
            media_dir: env_var(&["MEDIA_DIR"])
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("media")),
        })
    }
}
