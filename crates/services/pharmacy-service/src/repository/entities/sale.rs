//! Sale database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sale")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Minor units
    pub total_amount: i64,
    pub created_at: DateTimeUtc,
    /// User id of the selling employee
    pub employee_id: i32,
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
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItem,
}

impl Related<super::pharmacy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacy.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
