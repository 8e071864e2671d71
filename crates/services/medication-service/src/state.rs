//! Application state for dependency injection.

use std::sync::Arc;

use dbx::Datasource;
use jwt_guard::Jwt;

use crate::infra::MediaStore;
use crate::service::{ManufacturerService, MedicationService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub medication_service: Arc<dyn MedicationService>,
    pub manufacturer_service: Arc<dyn ManufacturerService>,
    pub jwt: Arc<Jwt>,
    pub datasource: Datasource,
    pub media: MediaStore,
}
