//! Medication image database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::models::MedicationImage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medication_image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub image_url: String,
    pub alt_text: String,
    pub medication_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::medication::Entity",
        from = "Column::MedicationId",
        to = "super::medication::Column::Id",
        on_delete = "Cascade"
    )]
    Medication,
}

impl Related<super::medication::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MedicationImage {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            alt_text: model.alt_text,
        }
    }
}
