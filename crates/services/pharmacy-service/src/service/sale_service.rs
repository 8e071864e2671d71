//! Sale service - placing sales and sales reports.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dbx::{transactional, transactional_service, HasUnitOfWork, RollbackPolicy, UnitOfWork};

use common::{AppError, AppResult};
use domain::sales::{deduct_stock, line_total, trend_window_start};
use domain::DomainError;

use crate::client::MedicationClient;
use crate::models::{MostSoldMedication, NewSaleItem, Sale, SaleTrend};
use crate::repository::{InventoryRepository, PharmacyRepository, SaleRepository};

#[async_trait]
pub trait SaleService: Send + Sync {
    /// Sell from a pharmacy's stock
    async fn save_sale(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        items: Vec<NewSaleItem>,
    ) -> AppResult<Sale>;

    /// Best sellers across the manager's pharmacies
    async fn get_most_sold(&self, manager_id: i32, limit: u64) -> AppResult<Vec<MostSoldMedication>>;

    /// Per-day totals of the manager's pharmacies over the last `days` days
    async fn get_sale_trends(&self, manager_id: i32, days: i64) -> AppResult<Vec<SaleTrend>>;
}

pub struct SaleManager {
    uow: UnitOfWork,
    sales: Arc<dyn SaleRepository>,
    inventories: Arc<dyn InventoryRepository>,
    pharmacies: Arc<dyn PharmacyRepository>,
    medications: Arc<dyn MedicationClient>,
}

impl SaleManager {
    pub fn new(
        uow: UnitOfWork,
        sales: Arc<dyn SaleRepository>,
        inventories: Arc<dyn InventoryRepository>,
        pharmacies: Arc<dyn PharmacyRepository>,
        medications: Arc<dyn MedicationClient>,
    ) -> Self {
        Self {
            uow,
            sales,
            inventories,
            pharmacies,
            medications,
        }
    }
}

impl HasUnitOfWork for SaleManager {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

#[transactional_service]
#[async_trait]
impl SaleService for SaleManager {
    #[transactional]
    async fn save_sale(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        items: Vec<NewSaleItem>,
    ) -> AppResult<Sale> {
        if items.is_empty() {
            return Err(AppError::validation("A sale needs at least one item"));
        }
        if !self.pharmacies.is_employee(pharmacy_id, employee_id).await? {
            return Err(DomainError::UnknownEmployee(employee_id).into());
        }

        let mut total_amount: i64 = 0;
        for item in &items {
            let line = line_total(item.unit_price, item.quantity)?;

            let mut inventory = self
                .inventories
                .find(pharmacy_id, item.medication_id)
                .await?
                .ok_or(DomainError::UnknownEmployee(employee_id))?;
            inventory.quantity = deduct_stock(item.medication_id, inventory.quantity, item.quantity)?;
            self.inventories.update(inventory).await?;

            total_amount = total_amount
                .checked_add(line)
                .ok_or_else(|| AppError::validation("Sale total is too large"))?;
        }

        let sale = self
            .sales
            .create(pharmacy_id, employee_id, total_amount, items)
            .await?;
        tracing::info!(sale_id = sale.id, pharmacy_id, employee_id, total_amount, "Sale placed");
        Ok(sale)
    }

    async fn get_most_sold(&self, manager_id: i32, limit: u64) -> AppResult<Vec<MostSoldMedication>> {
        if limit == 0 {
            return Err(AppError::validation("most_sold must be at least 1"));
        }

        let sold = self
            .uow
            .run(RollbackPolicy::always(), async {
                self.sales.most_sold(manager_id, limit).await
            })
            .await?;

        let ids = sold.iter().map(|s| s.medication_id).collect();
        let mut catalogue: HashMap<i32, _> = self
            .medications
            .get_medications_by_ids(ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(sold
            .into_iter()
            .filter_map(|s| match catalogue.remove(&s.medication_id) {
                Some(medication) => Some(MostSoldMedication {
                    medication_id: s.medication_id,
                    name: medication.name,
                    quantity: s.quantity,
                    manufacturer: medication.manufacturer,
                }),
                None => {
                    tracing::warn!(medication_id = s.medication_id, "Sold medication missing from catalogue");
                    None
                }
            })
            .collect())
    }

    #[transactional]
    async fn get_sale_trends(&self, manager_id: i32, days: i64) -> AppResult<Vec<SaleTrend>> {
        let since = trend_window_start(Utc::now(), days)?;
        let mut by_day: BTreeMap<_, SaleTrend> = BTreeMap::new();
        for (created_at, amount) in self.sales.sales_since(manager_id, since).await? {
            let day = created_at.date_naive();
            let trend = by_day.entry(day).or_insert_with(|| SaleTrend {
                sale_date: day,
                total_sales_amount: 0,
                number_of_sales: 0,
            });
            trend.total_sales_amount += amount;
            trend.number_of_sales += 1;
        }

        Ok(by_day.into_values().collect())
    }
}
