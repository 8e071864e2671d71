//! User repository executing on the current unit of work.

use async_trait::async_trait;
use dbx::CrudRepository;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::AppResult;
use domain::Role;

use crate::models::{NewUser, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every method must run inside a unit of work.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users, or only those holding `role`
    async fn find_by_role(&self, role: Option<Role>) -> AppResult<Vec<User>>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply `changes`; `None` when the user does not exist
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// SeaORM implementation of UserRepository
#[derive(Clone, Default)]
pub struct UserStore {
    users: CrudRepository<UserEntity>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        self.users
            .find_by_id(id)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let session = self.users.session()?;
        let conn = session.connection().await?;
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*conn)
            .await?;

        model.map(User::try_from).transpose()
    }

    async fn find_by_role(&self, role: Option<Role>) -> AppResult<Vec<User>> {
        let session = self.users.session()?;
        let conn = session.connection().await?;

        let mut query = UserEntity::find().order_by_asc(user::Column::Id);
        if let Some(role) = role {
            query = query.filter(user::Column::Role.eq(role.as_str()));
        }

        query
            .all(&*conn)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            email: Set(user.email),
            password: Set(user.password_hash),
            phone_number: Set(user.phone_number),
            role: Set(user.role.to_string()),
            notification_preference: Set(user.notification_preference.to_string()),
            ..Default::default()
        };

        let model = self.users.insert(active_model).await?;
        User::try_from(model)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>> {
        let Some(existing) = self.users.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        if let Some(phone_number) = changes.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        if let Some(preference) = changes.notification_preference {
            active.notification_preference = Set(preference.to_string());
        }

        let model = self.users.update(active).await?;
        User::try_from(model).map(Some)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.users.delete_by_id(id).await?)
    }
}
