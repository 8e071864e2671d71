//! Medication database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medication")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Minor units
    pub purchase_price: i64,
    pub created_at: DateTimeUtc,
    pub manufacturer_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id",
        on_delete = "SetNull"
    )]
    Manufacturer,
    #[sea_orm(has_many = "super::medication_image::Entity")]
    MedicationImage,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::medication_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MedicationImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
