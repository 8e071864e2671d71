//! Migration: Create the medication image table.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_medication_table::Medication;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MedicationImage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MedicationImage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MedicationImage::ImageUrl).string().not_null())
                    .col(ColumnDef::new(MedicationImage::AltText).string().not_null())
                    .col(ColumnDef::new(MedicationImage::MedicationId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_medication_image_medication")
                            .from(MedicationImage::Table, MedicationImage::MedicationId)
                            .to(Medication::Table, Medication::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_medication_image_medication")
                    .table(MedicationImage::Table)
                    .col(MedicationImage::MedicationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MedicationImage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MedicationImage {
    Table,
    Id,
    ImageUrl,
    AltText,
    MedicationId,
}
