//! Migration: Create the pharmacy table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pharmacy::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pharmacy::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pharmacy::Name).string().not_null())
                    .col(ColumnDef::new(Pharmacy::Address).string().not_null())
                    .col(
                        ColumnDef::new(Pharmacy::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    // User id owned by the user service
                    .col(ColumnDef::new(Pharmacy::ManagerId).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pharmacy_manager")
                    .table(Pharmacy::Table)
                    .col(Pharmacy::ManagerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pharmacy::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Pharmacy {
    Table,
    Id,
    Name,
    Address,
    IsActive,
    ManagerId,
}
