//! Inventory repository executing on the current unit of work.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use dbx::CrudRepository;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::entities::inventory;
use common::{AppError, AppResult};

use crate::models::{Inventory, InventoryRegistration};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find(&self, pharmacy_id: i32, medication_id: i32) -> AppResult<Option<Inventory>>;

    /// Insert, or overwrite quantity and expiration of the existing row
    async fn upsert(&self, pharmacy_id: i32, registration: InventoryRegistration) -> AppResult<Inventory>;

    /// Write quantity and expiration date of an existing row
    async fn update(&self, inventory: Inventory) -> AppResult<Inventory>;

    /// Distinct medications with unexpired, non-empty stock anywhere
    async fn medication_ids_in_stock(&self, today: NaiveDate) -> AppResult<Vec<i32>>;

    async fn medication_ids_at(&self, pharmacy_id: i32) -> AppResult<Vec<i32>>;
}

/// SeaORM implementation of InventoryRepository
#[derive(Clone, Default)]
pub struct InventoryStore {
    inventories: CrudRepository<inventory::Entity>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_model(
        &self,
        pharmacy_id: i32,
        medication_id: i32,
    ) -> AppResult<Option<inventory::Model>> {
        let session = self.inventories.session()?;
        let conn = session.connection().await?;

        Ok(inventory::Entity::find()
            .filter(inventory::Column::PharmacyId.eq(pharmacy_id))
            .filter(inventory::Column::MedicationId.eq(medication_id))
            .one(&*conn)
            .await?)
    }
}

#[async_trait]
impl InventoryRepository for InventoryStore {
    async fn find(&self, pharmacy_id: i32, medication_id: i32) -> AppResult<Option<Inventory>> {
        Ok(self
            .find_model(pharmacy_id, medication_id)
            .await?
            .map(Inventory::from))
    }

    async fn upsert(&self, pharmacy_id: i32, registration: InventoryRegistration) -> AppResult<Inventory> {
        let model = match self.find_model(pharmacy_id, registration.medication_id).await? {
            Some(existing) => {
                self.inventories
                    .update(inventory::ActiveModel {
                        id: Set(existing.id),
                        quantity: Set(registration.quantity),
                        expiration_date: Set(registration.expiration_date),
                        ..Default::default()
                    })
                    .await?
            }
            None => {
                self.inventories
                    .insert(inventory::ActiveModel {
                        quantity: Set(registration.quantity),
                        expiration_date: Set(registration.expiration_date),
                        medication_id: Set(registration.medication_id),
                        pharmacy_id: Set(pharmacy_id),
                        ..Default::default()
                    })
                    .await?
            }
        };
        Ok(model.into())
    }

    async fn update(&self, inventory: Inventory) -> AppResult<Inventory> {
        if self.inventories.find_by_id(inventory.id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let model = self
            .inventories
            .update(inventory::ActiveModel {
                id: Set(inventory.id),
                quantity: Set(inventory.quantity),
                expiration_date: Set(inventory.expiration_date),
                ..Default::default()
            })
            .await?;
        Ok(model.into())
    }

    async fn medication_ids_in_stock(&self, today: NaiveDate) -> AppResult<Vec<i32>> {
        let session = self.inventories.session()?;
        let conn = session.connection().await?;

        let ids: BTreeSet<i32> = inventory::Entity::find()
            .filter(inventory::Column::Quantity.gt(0))
            .filter(inventory::Column::ExpirationDate.gt(today))
            .all(&*conn)
            .await?
            .into_iter()
            .map(|m| m.medication_id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    async fn medication_ids_at(&self, pharmacy_id: i32) -> AppResult<Vec<i32>> {
        let session = self.inventories.session()?;
        let conn = session.connection().await?;

        let models = inventory::Entity::find()
            .filter(inventory::Column::PharmacyId.eq(pharmacy_id))
            .order_by_asc(inventory::Column::MedicationId)
            .all(&*conn)
            .await?;
        Ok(models.into_iter().map(|m| m.medication_id).collect())
    }
}
