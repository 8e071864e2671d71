//! Pharmacy employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pharmacy_employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// User id in the user service
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
}

impl Related<super::pharmacy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
