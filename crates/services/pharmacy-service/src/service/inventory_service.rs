//! Inventory service - stock registration, updates and stocked medications.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dbx::{transactional, transactional_service, HasUnitOfWork, RollbackPolicy, UnitOfWork};

use common::{AppError, AppResult};
use domain::validation::validate_future_date;
use domain::DomainError;

use crate::client::MedicationClient;
use crate::models::{Inventory, InventoryChanges, InventoryRegistration, MedicationSummary};
use crate::repository::{InventoryRepository, PharmacyRepository};

#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Medications with unexpired stock at any pharmacy
    async fn get_medications_in_stock(&self) -> AppResult<Vec<MedicationSummary>>;

    /// Medications held by a pharmacy the employee works at
    async fn get_pharmacy_medications(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
    ) -> AppResult<Vec<MedicationSummary>>;

    /// Register stock at a pharmacy run by the manager
    async fn save_inventory(
        &self,
        pharmacy_id: i32,
        manager_id: i32,
        registration: InventoryRegistration,
    ) -> AppResult<Inventory>;

    async fn update_inventory(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        changes: InventoryChanges,
    ) -> AppResult<Inventory>;
}

pub struct InventoryManager {
    uow: UnitOfWork,
    inventories: Arc<dyn InventoryRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
    medications: Arc<dyn MedicationClient>,
}

impl InventoryManager {
    pub fn new(
        uow: UnitOfWork,
        inventories: Arc<dyn InventoryRepository>,
        pharmacies: Arc<dyn PharmacyRepository>,
        medications: Arc<dyn MedicationClient>,
    ) -> Self {
        Self {
            uow,
            inventories,
            pharmacies,
            medications,
        }
    }
}

impl HasUnitOfWork for InventoryManager {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn validate_stock(quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::validation("Quantity must not be negative"));
    }
    Ok(())
}

#[transactional_service]
#[async_trait]
impl InventoryService for InventoryManager {
    async fn get_medications_in_stock(&self) -> AppResult<Vec<MedicationSummary>> {
        let ids = self
            .uow
            .run(RollbackPolicy::always(), async {
                self.inventories.medication_ids_in_stock(today()).await
            })
            .await?;

        self.medications.get_medications_by_ids(ids).await
    }

    async fn get_pharmacy_medications(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
    ) -> AppResult<Vec<MedicationSummary>> {
        let ids = self
            .uow
            .run(RollbackPolicy::always(), async {
                if !self.pharmacies.is_employee(pharmacy_id, employee_id).await? {
                    return Err(DomainError::UnknownEmployee(employee_id).into());
                }
                self.inventories.medication_ids_at(pharmacy_id).await
            })
            .await?;

        self.medications.get_medications_by_ids(ids).await
    }

    async fn save_inventory(
        &self,
        pharmacy_id: i32,
        manager_id: i32,
        registration: InventoryRegistration,
    ) -> AppResult<Inventory> {
        validate_stock(registration.quantity)?;
        validate_future_date(registration.expiration_date, today())?;

        let pharmacy = self
            .pharmacies
            .find_by_id(pharmacy_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if pharmacy.manager_id != Some(manager_id) {
            return Err(AppError::Forbidden);
        }

        let inventory = self.inventories.upsert(pharmacy_id, registration).await?;
        tracing::info!(
            pharmacy_id,
            medication_id = inventory.medication_id,
            quantity = inventory.quantity,
            "Inventory registered"
        );
        Ok(inventory)
    }

    #[transactional(rollback_for(DomainRule, Storage))]
    async fn update_inventory(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        changes: InventoryChanges,
    ) -> AppResult<Inventory> {
        let mut inventory = self
            .inventories
            .find(pharmacy_id, changes.medication_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !self.pharmacies.is_employee(pharmacy_id, employee_id).await? {
            return Err(DomainError::UnknownEmployee(employee_id).into());
        }
        if changes.is_empty() {
            return Err(AppError::bad_request("Nothing to update"));
        }

        if let Some(quantity) = changes.quantity {
            validate_stock(quantity)?;
            inventory.quantity = quantity;
        }
        if let Some(expiration_date) = changes.expiration_date {
            validate_future_date(expiration_date, today())?;
            inventory.expiration_date = expiration_date;
        }

        let updated = self.inventories.update(inventory).await?;
        tracing::info!(pharmacy_id, medication_id = updated.medication_id, "Inventory updated");
        Ok(updated)
    }
}
