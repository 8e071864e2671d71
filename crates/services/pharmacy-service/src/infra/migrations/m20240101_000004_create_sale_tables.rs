//! Migration: Create the sale and sale item tables.

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
                    .table(Sale::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sale::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Minor units
                    .col(ColumnDef::new(Sale::TotalAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sale::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Sale::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(Sale::PharmacyId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_pharmacy")
                            .from(Sale::Table, Sale::PharmacyId)
                            .to(Pharmacy::Table, Pharmacy::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SaleItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaleItem::MedicationId).integer().not_null())
                    .col(
                        ColumnDef::new(SaleItem::Quantity)
                            .integer()
                            .not_null()
                            .check(Expr::col(SaleItem::Quantity).gt(0)),
                    )
                    .col(
                        ColumnDef::new(SaleItem::UnitPrice)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(SaleItem::UnitPrice).gt(0)),
                    )
                    .col(ColumnDef::new(SaleItem::SaleId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_item_sale")
                            .from(SaleItem::Table, SaleItem::SaleId)
                            .to(Sale::Table, Sale::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sale_item_sale")
                    .table(SaleItem::Table)
                    .col(SaleItem::SaleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sale::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sale {
    Table,
    Id,
    TotalAmount,
    CreatedAt,
    EmployeeId,
    PharmacyId,
}

#[derive(Iden)]
enum SaleItem {
    Table,
    Id,
    MedicationId,
    Quantity,
    UnitPrice,
    SaleId,
}
