//! Pharmacy and employee repository executing on the current unit of work.

use async_trait::async_trait;
use chrono::NaiveDate;
use dbx::CrudRepository;
use sea_orm::{
    ColumnTrait, EntityTrait, IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

use super::entities::{inventory, pharmacy, pharmacy_employee};
use common::{AppError, AppResult};

use crate::models::{NewPharmacy, Pharmacy};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PharmacyRepository: Send + Sync {
    async fn create(&self, pharmacy: NewPharmacy) -> AppResult<Pharmacy>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Pharmacy>>;

    /// Pharmacies holding unexpired, non-empty stock of a medication
    async fn find_stocking(&self, medication_id: i32, today: NaiveDate) -> AppResult<Vec<Pharmacy>>;

    async fn ids_managed_by(&self, manager_id: i32) -> AppResult<Vec<i32>>;

    async fn ids_employing(&self, employee_id: i32) -> AppResult<Vec<i32>>;

    async fn set_manager(&self, pharmacy_id: i32, manager_id: i32) -> AppResult<Pharmacy>;

    /// Register an employee; already registered employees are left alone
    async fn add_employee(&self, pharmacy_id: i32, employee_id: i32) -> AppResult<()>;

    async fn is_employee(&self, pharmacy_id: i32, employee_id: i32) -> AppResult<bool>;
}

/// SeaORM implementation of PharmacyRepository
#[derive(Clone, Default)]
pub struct PharmacyStore {
    pharmacies: CrudRepository<pharmacy::Entity>,
    employees: CrudRepository<pharmacy_employee::Entity>,
}

impl PharmacyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PharmacyRepository for PharmacyStore {
    async fn create(&self, new: NewPharmacy) -> AppResult<Pharmacy> {
        let model = self
            .pharmacies
            .insert(pharmacy::ActiveModel {
                name: Set(new.name),
                address: Set(new.address),
                is_active: Set(true),
                manager_id: Set(new.manager_id),
                ..Default::default()
            })
            .await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Pharmacy>> {
        Ok(self.pharmacies.find_by_id(id).await?.map(Pharmacy::from))
    }

    async fn find_stocking(&self, medication_id: i32, today: NaiveDate) -> AppResult<Vec<Pharmacy>> {
        let session = self.pharmacies.session()?;
        let conn = session.connection().await?;

        let models = pharmacy::Entity::find()
            .join(JoinType::InnerJoin, pharmacy::Relation::Inventory.def())
            .filter(inventory::Column::MedicationId.eq(medication_id))
            .filter(inventory::Column::Quantity.gt(0))
            .filter(inventory::Column::ExpirationDate.gt(today))
            .distinct()
            .order_by_asc(pharmacy::Column::Id)
            .all(&*conn)
            .await?;
        Ok(models.into_iter().map(Pharmacy::from).collect())
    }

    async fn ids_managed_by(&self, manager_id: i32) -> AppResult<Vec<i32>> {
        let session = self.pharmacies.session()?;
        let conn = session.connection().await?;

        let models = pharmacy::Entity::find()
            .filter(pharmacy::Column::ManagerId.eq(manager_id))
            .order_by_asc(pharmacy::Column::Id)
            .all(&*conn)
            .await?;
        Ok(models.into_iter().map(|m| m.id).collect())
    }

    async fn ids_employing(&self, employee_id: i32) -> AppResult<Vec<i32>> {
        let session = self.employees.session()?;
        let conn = session.connection().await?;

        let models = pharmacy_employee::Entity::find()
            .filter(pharmacy_employee::Column::EmployeeId.eq(employee_id))
            .order_by_asc(pharmacy_employee::Column::PharmacyId)
            .all(&*conn)
            .await?;
        Ok(models.into_iter().map(|m| m.pharmacy_id).collect())
    }

    async fn set_manager(&self, pharmacy_id: i32, manager_id: i32) -> AppResult<Pharmacy> {
        let model = self
            .pharmacies
            .find_by_id(pharmacy_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active = model.into_active_model();
        active.manager_id = Set(Some(manager_id));
        Ok(self.pharmacies.update(active).await?.into())
    }

    async fn add_employee(&self, pharmacy_id: i32, employee_id: i32) -> AppResult<()> {
        if self.is_employee(pharmacy_id, employee_id).await? {
            return Ok(());
        }

        self.employees
            .insert(pharmacy_employee::ActiveModel {
                employee_id: Set(employee_id),
                pharmacy_id: Set(pharmacy_id),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn is_employee(&self, pharmacy_id: i32, employee_id: i32) -> AppResult<bool> {
        let session = self.employees.session()?;
        let conn = session.connection().await?;

        let count = pharmacy_employee::Entity::find()
            .filter(pharmacy_employee::Column::PharmacyId.eq(pharmacy_id))
            .filter(pharmacy_employee::Column::EmployeeId.eq(employee_id))
            .count(&*conn)
            .await?;
        Ok(count > 0)
    }
}
