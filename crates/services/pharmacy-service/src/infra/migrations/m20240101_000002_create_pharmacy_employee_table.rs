//! Migration: Create the pharmacy employee table.

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
                    .table(PharmacyEmployee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PharmacyEmployee::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PharmacyEmployee::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(PharmacyEmployee::PharmacyId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pharmacy_employee_pharmacy")
                            .from(PharmacyEmployee::Table, PharmacyEmployee::PharmacyId)
                            .to(Pharmacy::Table, Pharmacy::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pharmacy_employee_unique")
                    .table(PharmacyEmployee::Table)
                    .col(PharmacyEmployee::PharmacyId)
                    .col(PharmacyEmployee::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PharmacyEmployee::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PharmacyEmployee {
    Table,
    Id,
    EmployeeId,
    PharmacyId,
}
