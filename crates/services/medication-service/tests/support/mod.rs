//! Shared fixtures: migrated in-memory database, temporary media directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use dbx::{Datasource, UnitOfWork};
use jwt_guard::Jwt;
use sea_orm::ConnectOptions;
use sea_orm_migration::MigratorTrait;

use medication_service_lib::infra::{MediaStore, Migrator};
use medication_service_lib::repository::{
    ManufacturerRepository, ManufacturerStore, MedicationRepository, MedicationStore,
};
use medication_service_lib::service::{ManufacturerManager, MedicationManager};
use medication_service_lib::state::AppState;

pub const SECRET: &[u8] = b"medication-test-secret-32-bytes!!";

pub async fn datasource() -> Datasource {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let datasource = Datasource::connect(options)
        .await
        .expect("in-memory database should open");
    Migrator::up(datasource.connection(), None)
        .await
        .expect("migrations should apply");
    datasource
}

pub fn media_dir() -> PathBuf {
    std::env::temp_dir().join(format!("medication-media-{}", uuid::Uuid::new_v4()))
}

/// Files currently in `dir`.
pub fn files_in(dir: &PathBuf) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub struct Fixture {
    pub datasource: Datasource,
    pub media_dir: PathBuf,
    pub jwt: Arc<Jwt>,
    pub medications: Arc<MedicationManager>,
    pub manufacturers: Arc<ManufacturerManager>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_repository(Arc::new(MedicationStore::new())).await
    }

    pub async fn with_repository(medication_repo: Arc<dyn MedicationRepository>) -> Self {
        let datasource = datasource().await;
        let uow = UnitOfWork::new(datasource.clone());
        let media_dir = media_dir();
        let manufacturer_repo: Arc<dyn ManufacturerRepository> = Arc::new(ManufacturerStore::new());

        Self {
            medications: Arc::new(MedicationManager::new(
                uow.clone(),
                medication_repo,
                manufacturer_repo.clone(),
                MediaStore::new(media_dir.clone()),
            )),
            manufacturers: Arc::new(ManufacturerManager::new(uow, manufacturer_repo)),
            jwt: Arc::new(Jwt::new(SECRET, Duration::hours(1))),
            media_dir,
            datasource,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            medication_service: self.medications.clone(),
            manufacturer_service: self.manufacturers.clone(),
            jwt: self.jwt.clone(),
            datasource: self.datasource.clone(),
            media: MediaStore::new(self.media_dir.clone()),
        }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.media_dir);
    }
}
