//! Inventory database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::Inventory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub quantity: i32,
    pub expiration_date: Date,
    /// Medication id in the medication service
    pub medication_id: i32,
    pub pharmacy_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pharmacy::Entity",
        from = "Column::PharmacyId",
        to = "super::pharmacy::Column::Id",
        on_delete = "Cascade"
    )]
    Pharmacy,
}

impl Related<super::pharmacy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Inventory {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            quantity: model.quantity,
            expiration_date: model.expiration_date,
            medication_id: model.medication_id,
            pharmacy_id: model.pharmacy_id,
        }
    }
}
