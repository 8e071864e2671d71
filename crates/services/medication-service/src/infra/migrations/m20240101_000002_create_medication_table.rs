//! Migration: Create the medication table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_manufacturer_table::Manufacturer;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Medication::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Medication::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Medication::Name).string().not_null())
                    .col(ColumnDef::new(Medication::Description).string().not_null())
                    // Minor units
                    .col(ColumnDef::new(Medication::PurchasePrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Medication::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Medication::ManufacturerId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medication_manufacturer")
                            .from(Medication::Table, Medication::ManufacturerId)
                            .to(Manufacturer::Table, Manufacturer::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Medication::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Medication {
    Table,
    Id,
    Name,
    Description,
    PurchasePrice,
    CreatedAt,
    ManufacturerId,
}
