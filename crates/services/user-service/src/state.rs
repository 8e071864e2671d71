//! Application state for dependency injection.

use std::sync::Arc;

use dbx::Datasource;
use jwt_guard::{Jwt, TokenIssuer};

use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub issuer: TokenIssuer,
    pub jwt: Arc<Jwt>,
    pub datasource: Datasource,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserService>,
        issuer: TokenIssuer,
        jwt: Arc<Jwt>,
        datasource: Datasource,
    ) -> Self {
        Self {
            user_service,
            issuer,
            jwt,
            datasource,
        }
    }
}
