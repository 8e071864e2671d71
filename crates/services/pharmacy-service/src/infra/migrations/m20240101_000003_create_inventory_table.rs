//! Migration: Create the inventory table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_pharmacy_table::Pharmacy;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Inventory::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(Inventory::Quantity).gte(0)),
                    )
                    .col(ColumnDef::new(Inventory::ExpirationDate).date().not_null())
                    // Medication id owned by the medication service
                    .col(ColumnDef::new(Inventory::MedicationId).integer().not_null())
                    .col(ColumnDef::new(Inventory::PharmacyId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_pharmacy")
                            .from(Inventory::Table, Inventory::PharmacyId)
                            .to(Pharmacy::Table, Pharmacy::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inventory_pharmacy_medication")
                    .table(Inventory::Table)
                    .col(Inventory::PharmacyId)
                    .col(Inventory::MedicationId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inventory {
    Table,
    Id,
    Quantity,
    ExpirationDate,
    MedicationId,
    PharmacyId,
}
