//! Pharmacy Service Library
//!
//! Pharmacies, their stock and sales over HTTP, plus the internal API the
//! user service uses to attach managers and employees.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod client;
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

use common::AppResult;

pub use dbx::migration::MigrateAction;

use crate::client::{MedicationApiClient, MedicationClient, StubMedicationClient};
use crate::config::PharmacyServiceConfig;
use crate::infra::Migrator;
use crate::repository::{
    InventoryRepository, InventoryStore, PharmacyRepository, PharmacyStore, SaleStore,
};
use crate::routes::create_router;
use crate::service::{InventoryManager, PharmacyManager, SaleManager};
use crate::state::{AppState, InternalKeys};

/// Wire services over `datasource`.
pub fn build_state(config: &PharmacyServiceConfig, datasource: Datasource) -> AppResult<AppState> {
    let medications: Arc<dyn MedicationClient> = if config.medication.mock {
        info!("Using the stub medication client");
        Arc::new(StubMedicationClient)
    } else {
        Arc::new(MedicationApiClient::new(&config.medication)?)
    };

    let uow = UnitOfWork::new(datasource.clone());
    let pharmacies: Arc<dyn PharmacyRepository> = Arc::new(PharmacyStore::new());
    let inventories: Arc<dyn InventoryRepository> = Arc::new(InventoryStore::new());

    if config.internal_api_keys.is_empty() {
        tracing::warn!("INTERNAL_API_KEYS is empty; internal routes will reject every request");
    }

    Ok(AppState {
        pharmacy_service: Arc::new(PharmacyManager::new(uow.clone(), pharmacies.clone())),
        inventory_service: Arc::new(InventoryManager::new(
            uow.clone(),
            inventories.clone(),
            pharmacies.clone(),
            medications.clone(),
        )),
        sale_service: Arc::new(SaleManager::new(
            uow,
            Arc::new(SaleStore::new()),
            inventories,
            pharmacies,
            medications,
        )),
        jwt: Arc::new(Jwt::from_config(&config.jwt)),
        datasource,
        internal_keys: InternalKeys::new(config.internal_api_keys.clone()),
    })
}

/// Build the HTTP application.
pub fn build_app(config: &PharmacyServiceConfig, datasource: Datasource) -> AppResult<Router> {
    Ok(create_router(build_state(config, datasource)?))
}

/// Run the pharmacy service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PharmacyServiceConfig::from_env()?;
    config.service.host = host.to_string();
    config.service.port = port;
    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = PharmacyServiceConfig::from_env()?;
    let datasource = infra::connect_without_migrations(&config.database).await?;
    dbx::migration::apply::<Migrator>(&datasource, action).await?;
    Ok(())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: PharmacyServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let datasource = infra::connect(&config.database).await?;
    let app = build_app(&config, datasource)?;

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("Pharmacy service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
