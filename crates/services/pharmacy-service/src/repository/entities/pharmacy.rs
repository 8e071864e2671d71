//! Pharmacy database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::Pharmacy;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pharmacy")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub is_active: bool,
    pub manager_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
    #[sea_orm(has_many = "super::pharmacy_employee::Entity")]
    PharmacyEmployee,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::pharmacy_employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PharmacyEmployee.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Pharmacy {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            is_active: model.is_active,
            manager_id: model.manager_id,
        }
    }
}
