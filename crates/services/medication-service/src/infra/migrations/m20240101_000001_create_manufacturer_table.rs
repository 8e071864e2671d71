//! Migration: Create the manufacturer table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Manufacturer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Manufacturer::Name).string().not_null())
                    .col(ColumnDef::new(Manufacturer::ContactInfo).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Manufacturer::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Manufacturer {
    Table,
    Id,
    Name,
    ContactInfo,
}
