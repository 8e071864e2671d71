//! Manufacturer service.

use std::sync::Arc;

use async_trait::async_trait;
use dbx::{transactional, transactional_service, HasUnitOfWork, UnitOfWork};

use common::AppResult;

use crate::models::{Manufacturer, NewManufacturer};
use crate::repository::ManufacturerRepository;

#[async_trait]
pub trait ManufacturerService: Send + Sync {
    async fn get_manufacturers(&self) -> AppResult<Vec<Manufacturer>>;

    async fn save_manufacturer(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer>;
}

pub struct ManufacturerManager {
    uow: UnitOfWork,
    manufacturers: Arc<dyn ManufacturerRepository>,
}

impl ManufacturerManager {
    pub fn new(uow: UnitOfWork, manufacturers: Arc<dyn ManufacturerRepository>) -> Self {
        Self { uow, manufacturers }
    }
}

impl HasUnitOfWork for ManufacturerManager {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

#[transactional_service]
#[async_trait]
impl ManufacturerService for ManufacturerManager {
    #[transactional]
    async fn get_manufacturers(&self) -> AppResult<Vec<Manufacturer>> {
        self.manufacturers.find_all().await
    }

    async fn save_manufacturer(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer> {
        let created = self.manufacturers.create(manufacturer).await?;
        tracing::info!(manufacturer_id = created.id, "Manufacturer created");
        Ok(created)
    }
}
