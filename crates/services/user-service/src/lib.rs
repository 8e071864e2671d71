//! User Service Library
//!
//! User accounts, invitations and token issuing over HTTP.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod client;
pub mod config;
pub mod handlers;
pub mod infra;
pub mod models;
pub mod notification;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use dbx::{Datasource, UnitOfWork};
use jwt_guard::{Jwt, TokenIssuer};
use tracing::info;

use common::AppResult;

pub use dbx::migration::MigrateAction;

use crate::client::{PharmacyApiClient, PharmacyClient, StubPharmacyClient};
use crate::config::UserServiceConfig;
use crate::infra::Migrator;
use crate::notification::{EmailNotifier, Notifications, SmsNotifier};
use crate::repository::UserStore;
use crate::routes::create_router;
use crate::service::{UserManager, UserService};
use crate::state::AppState;

/// Wire services over `datasource`.
pub fn build_state(config: &UserServiceConfig, datasource: Datasource) -> AppResult<AppState> {
    let jwt = Arc::new(Jwt::from_config(&config.jwt));

    let pharmacies: Arc<dyn PharmacyClient> = if config.pharmacy.mock {
        info!("Using the stub pharmacy client");
        Arc::new(StubPharmacyClient)
    } else {
        Arc::new(PharmacyApiClient::new(&config.pharmacy)?)
    };

    let notifications = Notifications::new(
        Arc::new(EmailNotifier::new(&config.smtp)?),
        Arc::new(SmsNotifier),
    );

    let manager = Arc::new(UserManager::new(
        UnitOfWork::new(datasource.clone()),
        Arc::new(UserStore::new()),
        pharmacies,
        notifications,
        jwt.clone(),
        config.frontend_url.clone(),
    ));

    let issuer = TokenIssuer::new(manager.clone(), jwt.clone());
    Ok(AppState::new(manager, issuer, jwt, datasource))
}

/// Build the HTTP application.
pub fn build_app(config: &UserServiceConfig, datasource: Datasource) -> AppResult<Router> {
    Ok(create_router(build_state(config, datasource)?))
}

/// Run the user service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = UserServiceConfig::from_env()?;
    config.service.host = host.to_string();
    config.service.port = port;
    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env()?;
    let datasource = infra::connect_without_migrations(&config.database).await?;
    dbx::migration::apply::<Migrator>(&datasource, action).await?;
    Ok(())
}

/// Create the first administrator.
pub async fn seed_admin(
    email: &str,
    password: &str,
    phone_number: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env()?;
    let datasource = infra::connect(&config.database).await?;
    let state = build_state(&config, datasource)?;

    let admin = state.user_service.save_admin(email, password, phone_number).await?;
    info!(user_id = admin.id, "Administrator {} created", admin.email);
    Ok(())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: UserServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let datasource = infra::connect(&config.database).await?;
    let app = build_app(&config, datasource)?;

    let addr: SocketAddr = config.service.addr().parse()?;
    info!("User service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
