//! Medication Service Library
//!
//! Medication catalogue, manufacturers and medication images over HTTP.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod handlers;
pub mod infra;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dbx::{Datasource, UnitOfWork};
use jwt_guard::Jwt;
use tracing::info;

pub use dbx::migration::MigrateAction;

use crate::config::MedicationServiceConfig;
use crate::infra::{MediaStore, Migrator};
use crate::repository::{ManufacturerRepository, ManufacturerStore, MedicationStore};
use crate::routes::create_router;
use crate::service::{ManufacturerManager, MedicationManager};
use crate::state::AppState;

/// Wire services over `datasource`.
pub fn build_state(config: &MedicationServiceConfig, datasource: Datasource) -> AppState {
    let uow = UnitOfWork::new(datasource.clone());
    let manufacturers: Arc<dyn ManufacturerRepository> = Arc::new(ManufacturerStore::new());
    let media = MediaStore::new(config.media_dir.clone());

    AppState {
        medication_service: Arc::new(MedicationManager::new(
            uow.clone(),
            Arc::new(MedicationStore::new()),
            manufacturers.clone(),
            media.clone(),
        )),
        manufacturer_service: Arc::new(ManufacturerManager::new(uow, manufacturers)),
        jwt: Arc::new(Jwt::from_config(&config.jwt)),
        datasource,
        media,
    }
}

/// Build the HTTP application.
pub fn build_app(config: &MedicationServiceConfig, datasource: Datasource) -> Router {
    create_router(build_state(config, datasource))
}

/// Run the medication service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = MedicationServiceConfig::from_env()?;
    config.service.host = host.to_string();
    config.service.port = port;
    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = MedicationServiceConfig::from_env()?;
    let datasource = infra::connect_without_migrations(&config.database).await?;
    dbx::migration::apply::<Migrator>(&datasource, action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: MedicationServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let datasource = infra::connect(&config.database).await?;
    let app = build_app(&config, datasource);

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("Medication service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
