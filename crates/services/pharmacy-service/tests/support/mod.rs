//! Shared fixtures: migrated in-memory database and wired services.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use dbx::{Datasource, UnitOfWork};
use jwt_guard::Jwt;
use sea_orm::{ActiveModelTrait, ConnectOptions, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;

use pharmacy_service_lib::client::{MedicationClient, StubMedicationClient};
use pharmacy_service_lib::infra::Migrator;
use pharmacy_service_lib::models::{InventoryRegistration, NewPharmacy, Pharmacy, UserAssignment};
use pharmacy_service_lib::repository::{
    entities::inventory, InventoryRepository, InventoryStore, PharmacyRepository, PharmacyStore,
    SaleStore,
};
use pharmacy_service_lib::service::{
    InventoryManager, InventoryService, PharmacyManager, PharmacyService, SaleManager,
};
use pharmacy_service_lib::state::{AppState, InternalKeys};

pub const SECRET: &[u8] = b"pharmacy-service-test-secret-32b!";
pub const INTERNAL_KEY: &str = "user-service-key";

pub const MANAGER_ID: i32 = 10;
pub const EMPLOYEE_ID: i32 = 20;

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

pub fn in_days(days: i64) -> NaiveDate {
    (Utc::now() + Duration::days(days)).date_naive()
}

pub struct Fixture {
    pub datasource: Datasource,
    pub jwt: Arc<Jwt>,
    pub pharmacies: Arc<PharmacyManager>,
    pub inventory: Arc<InventoryManager>,
    pub sales: Arc<SaleManager>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_client(Arc::new(StubMedicationClient)).await
    }

    pub async fn with_client(medications: Arc<dyn MedicationClient>) -> Self {
        let datasource = datasource().await;
        let uow = UnitOfWork::new(datasource.clone());
        let pharmacy_repo: Arc<dyn PharmacyRepository> = Arc::new(PharmacyStore::new());
        let inventory_repo: Arc<dyn InventoryRepository> = Arc::new(InventoryStore::new());

        Self {
            pharmacies: Arc::new(PharmacyManager::new(uow.clone(), pharmacy_repo.clone())),
            inventory: Arc::new(InventoryManager::new(
                uow.clone(),
                inventory_repo.clone(),
                pharmacy_repo.clone(),
                medications.clone(),
            )),
            sales: Arc::new(SaleManager::new(
                uow,
                Arc::new(SaleStore::new()),
                inventory_repo,
                pharmacy_repo,
                medications,
            )),
            jwt: Arc::new(Jwt::new(SECRET, Duration::hours(1))),
            datasource,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            pharmacy_service: self.pharmacies.clone(),
            inventory_service: self.inventory.clone(),
            sale_service: self.sales.clone(),
            jwt: self.jwt.clone(),
            datasource: self.datasource.clone(),
            internal_keys: InternalKeys::new(vec![INTERNAL_KEY.to_string()]),
        }
    }

    /// A pharmacy run by `MANAGER_ID` with `EMPLOYEE_ID` on staff.
    pub async fn staffed_pharmacy(&self, name: &str) -> Pharmacy {
        let pharmacy = self
            .pharmacies
            .save_pharmacy(NewPharmacy {
                name: name.to_string(),
                address: "Bd. Unirii 1".to_string(),
                manager_id: Some(MANAGER_ID),
            })
            .await
            .unwrap();
        self.pharmacies
            .save_user_assignment(UserAssignment {
                user_id: EMPLOYEE_ID,
                pharmacy_id: pharmacy.id,
                role: domain::Role::Employee,
            })
            .await
            .unwrap();
        pharmacy
    }

    pub async fn stock(&self, pharmacy_id: i32, medication_id: i32, quantity: i32, expires_in_days: i64) {
        self.inventory
            .save_inventory(
                pharmacy_id,
                MANAGER_ID,
                InventoryRegistration {
                    medication_id,
                    quantity,
                    expiration_date: in_days(expires_in_days),
                },
            )
            .await
            .unwrap();
    }

    /// Insert a row directly, bypassing expiration checks.
    pub async fn raw_stock(&self, pharmacy_id: i32, medication_id: i32, quantity: i32, expiration_date: NaiveDate) {
        inventory::ActiveModel {
            quantity: Set(quantity),
            expiration_date: Set(expiration_date),
            medication_id: Set(medication_id),
            pharmacy_id: Set(pharmacy_id),
            ..Default::default()
        }
        .insert(self.datasource.connection())
        .await
        .unwrap();
    }

    /// Stored quantity, read outside any unit of work.
    pub async fn quantity(&self, pharmacy_id: i32, medication_id: i32) -> Option<i32> {
        inventory::Entity::find()
            .all(self.datasource.connection())
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.pharmacy_id == pharmacy_id && i.medication_id == medication_id)
            .map(|i| i.quantity)
    }
}
