//! Manufacturer repository executing on the current unit of work.

use async_trait::async_trait;
use dbx::CrudRepository;
use sea_orm::{EntityTrait, QueryOrder, Set};

use super::entities::manufacturer::{self, ActiveModel, Entity as ManufacturerEntity};
use common::AppResult;

use crate::models::{Manufacturer, NewManufacturer};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ManufacturerRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Manufacturer>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Manufacturer>>;

    async fn create(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer>;
}

/// SeaORM implementation of ManufacturerRepository
#[derive(Clone, Default)]
pub struct ManufacturerStore {
    manufacturers: CrudRepository<ManufacturerEntity>,
}

impl ManufacturerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManufacturerRepository for ManufacturerStore {
    async fn find_all(&self) -> AppResult<Vec<Manufacturer>> {
        let session = self.manufacturers.session()?;
        let conn = session.connection().await?;
        let models = ManufacturerEntity::find()
            .order_by_asc(manufacturer::Column::Name)
            .all(&*conn)
            .await?;
        Ok(models.into_iter().map(Manufacturer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Manufacturer>> {
        Ok(self.manufacturers.find_by_id(id).await?.map(Manufacturer::from))
    }

    async fn create(&self, new: NewManufacturer) -> AppResult<Manufacturer> {
        let model = self
            .manufacturers
            .insert(ActiveModel {
                name: Set(new.name),
                contact_info: Set(new.contact_info),
                ..Default::default()
            })
            .await?;
        Ok(model.into())
    }
}
