//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppError;

use crate::models::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 hash
    pub password: String,
    pub phone_number: String,
    pub role: String,
    pub notification_preference: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to the service entity
impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password,
            phone_number: model.phone_number,
            role: model
                .role
                .parse()
                .map_err(|_| AppError::internal(format!("Stored role is invalid: {}", model.role)))?,
            notification_preference: model.notification_preference.parse().map_err(|_| {
                AppError::internal(format!(
                    "Stored notification preference is invalid: {}",
                    model.notification_preference
                ))
            })?,
        })
    }
}
