//! Sale item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::SaleItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sale_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub medication_id: i32,
    pub quantity: i32,
    /// Minor units
    pub unit_price: i64,
    pub sale_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_delete = "Cascade"
    )]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SaleItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            medication_id: model.medication_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
        }
    }
}
