//! Pharmacy service - pharmacies, their managers and employees.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dbx::{transactional, transactional_service, HasUnitOfWork, UnitOfWork};

use common::{AppError, AppResult};
use domain::Role;

use crate::models::{NewPharmacy, Pharmacy, UserAssignment};
use crate::repository::PharmacyRepository;

#[async_trait]
pub trait PharmacyService: Send + Sync {
    async fn save_pharmacy(&self, pharmacy: NewPharmacy) -> AppResult<Pharmacy>;

    /// Pharmacies where a medication can be bought today
    async fn get_pharmacies_with_medication(&self, medication_id: i32) -> AppResult<Vec<Pharmacy>>;

    /// Ids of the pharmacies a manager runs or an employee works at
    async fn get_pharmacy_ids(&self, user_id: i32, role: Role) -> AppResult<Vec<i32>>;

    /// Attach a user to a pharmacy according to their role
    async fn save_user_assignment(&self, assignment: UserAssignment) -> AppResult<()>;
}

/// How a user is attached to a pharmacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssignmentStrategy {
    AddEmployee,
    AddManager,
}

impl AssignmentStrategy {
    fn for_role(role: Role) -> AppResult<Self> {
        match role {
            Role::Employee => Ok(Self::AddEmployee),
            Role::Manager => Ok(Self::AddManager),
            Role::Admin => Err(AppError::bad_request(format!(
                "Role {} cannot be assigned to a pharmacy",
                role
            ))),
        }
    }

    async fn apply(
        self,
        pharmacies: &dyn PharmacyRepository,
        pharmacy_id: i32,
        user_id: i32,
    ) -> AppResult<()> {
        match self {
            Self::AddEmployee => pharmacies.add_employee(pharmacy_id, user_id).await,
            Self::AddManager => pharmacies.set_manager(pharmacy_id, user_id).await.map(|_| ()),
        }
    }
}

pub struct PharmacyManager {
    uow: UnitOfWork,
    pharmacies: Arc<dyn PharmacyRepository>,
}

impl PharmacyManager {
    pub fn new(uow: UnitOfWork, pharmacies: Arc<dyn PharmacyRepository>) -> Self {
        Self { uow, pharmacies }
    }
}

impl HasUnitOfWork for PharmacyManager {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

#[transactional_service]
#[async_trait]
impl PharmacyService for PharmacyManager {
    async fn save_pharmacy(&self, pharmacy: NewPharmacy) -> AppResult<Pharmacy> {
        if pharmacy.name.trim().is_empty() || pharmacy.address.trim().is_empty() {
            return Err(AppError::validation("Name and address are required"));
        }

        let created = self.pharmacies.create(pharmacy).await?;
        tracing::info!(pharmacy_id = created.id, manager_id = ?created.manager_id, "Pharmacy created");
        Ok(created)
    }

    #[transactional]
    async fn get_pharmacies_with_medication(&self, medication_id: i32) -> AppResult<Vec<Pharmacy>> {
        let today = Utc::now().date_naive();
        self.pharmacies.find_stocking(medication_id, today).await
    }

    #[transactional]
    async fn get_pharmacy_ids(&self, user_id: i32, role: Role) -> AppResult<Vec<i32>> {
        match role {
            Role::Manager => self.pharmacies.ids_managed_by(user_id).await,
            Role::Employee => self.pharmacies.ids_employing(user_id).await,
            Role::Admin => Err(AppError::bad_request("Administrators have no pharmacies")),
        }
    }

    async fn save_user_assignment(&self, assignment: UserAssignment) -> AppResult<()> {
        let strategy = AssignmentStrategy::for_role(assignment.role)?;
        if self.pharmacies.find_by_id(assignment.pharmacy_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        strategy
            .apply(self.pharmacies.as_ref(), assignment.pharmacy_id, assignment.user_id)
            .await?;
        tracing::info!(
            user_id = assignment.user_id,
            pharmacy_id = assignment.pharmacy_id,
            role = %assignment.role,
            "User assigned to pharmacy"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_by_role() {
        assert_eq!(
            AssignmentStrategy::for_role(Role::Employee).unwrap(),
            AssignmentStrategy::AddEmployee
        );
        assert_eq!(
            AssignmentStrategy::for_role(Role::Manager).unwrap(),
            AssignmentStrategy::AddManager
        );
        assert!(matches!(
            AssignmentStrategy::for_role(Role::Admin),
            Err(AppError::BadRequest(_))
        ));
    }
}
