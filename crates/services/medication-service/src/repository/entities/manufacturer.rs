//! Manufacturer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::Manufacturer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "manufacturer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contact_info: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::medication::Entity")]
    Medication,
}

impl Related<super::medication::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Manufacturer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            contact_info: model.contact_info,
        }
    }
}
