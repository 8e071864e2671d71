//! Sale repository and sales reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbx::CrudRepository;
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::entities::{pharmacy, sale, sale_item};
use common::AppResult;

use crate::models::{NewSaleItem, Sale, SaleItem, SoldQuantity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn create(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        total_amount: i64,
        items: Vec<NewSaleItem>,
    ) -> AppResult<Sale>;

    /// Medications by sold quantity, highest first, across a manager's pharmacies
    async fn most_sold(&self, manager_id: i32, limit: u64) -> AppResult<Vec<SoldQuantity>>;

    /// `(created_at, total_amount)` of a manager's sales since `since`, oldest first
    async fn sales_since(
        &self,
        manager_id: i32,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<(DateTime<Utc>, i64)>>;
}

/// SeaORM implementation of SaleRepository
#[derive(Clone, Default)]
pub struct SaleStore {
    sales: CrudRepository<sale::Entity>,
    items: CrudRepository<sale_item::Entity>,
}

impl SaleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleRepository for SaleStore {
    async fn create(
        &self,
        pharmacy_id: i32,
        employee_id: i32,
        total_amount: i64,
        items: Vec<NewSaleItem>,
    ) -> AppResult<Sale> {
        let sale = self
            .sales
            .insert(sale::ActiveModel {
                total_amount: Set(total_amount),
                created_at: Set(Utc::now()),
                employee_id: Set(employee_id),
                pharmacy_id: Set(pharmacy_id),
                ..Default::default()
            })
            .await?;

        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            let model = self
                .items
                .insert(sale_item::ActiveModel {
                    medication_id: Set(item.medication_id),
                    quantity: Set(item.quantity),
                    unit_price: Set(item.unit_price),
                    sale_id: Set(sale.id),
                    ..Default::default()
                })
                .await?;
            stored.push(SaleItem::from(model));
        }

        Ok(Sale {
            id: sale.id,
            total_amount: sale.total_amount,
            created_at: sale.created_at,
            employee_id: sale.employee_id,
            pharmacy_id: sale.pharmacy_id,
            items: stored,
        })
    }

    async fn most_sold(&self, manager_id: i32, limit: u64) -> AppResult<Vec<SoldQuantity>> {
        let session = self.items.session()?;
        let conn = session.connection().await?;

        let rows: Vec<(i32, i64)> = sale_item::Entity::find()
            .select_only()
            .column(sale_item::Column::MedicationId)
            .column_as(sale_item::Column::Quantity.sum(), "quantity")
            .join(JoinType::InnerJoin, sale_item::Relation::Sale.def())
            .join(JoinType::InnerJoin, sale::Relation::Pharmacy.def())
            .filter(pharmacy::Column::ManagerId.eq(manager_id))
            .group_by(sale_item::Column::MedicationId)
            .order_by_desc(sale_item::Column::Quantity.sum())
            .order_by_asc(sale_item::Column::MedicationId)
            .limit(limit)
            .into_tuple()
            .all(&*conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(medication_id, quantity)| SoldQuantity {
                medication_id,
                quantity,
            })
            .collect())
    }

    async fn sales_since(
        &self,
        manager_id: i32,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<(DateTime<Utc>, i64)>> {
        let session = self.sales.session()?;
        let conn = session.connection().await?;

        let models = sale::Entity::find()
            .join(JoinType::InnerJoin, sale::Relation::Pharmacy.def())
            .filter(pharmacy::Column::ManagerId.eq(manager_id))
            .filter(sale::Column::CreatedAt.gte(since))
            .order_by_asc(sale::Column::CreatedAt)
            .all(&*conn)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| (m.created_at, m.total_amount))
            .collect())
    }
}
