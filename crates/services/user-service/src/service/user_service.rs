//! User service - Handles user-related business logic.
//!
//! Methods named `save_*`, `update_*` and `delete_*` run in their own unit of
//! work; read paths opt in with `#[transactional]`.

use std::sync::Arc;

use async_trait::async_trait;
use dbx::{transactional, transactional_service, HasUnitOfWork, UnitOfWork};
use jwt_guard::{Jwt, Principal, PrincipalStore};

use common::{AppError, AppResult};
use domain::{NotificationPreference, Password, Role};

use crate::client::PharmacyClient;
use crate::models::{InviteClaims, Invitation, NewUser, Registration, User, UserChanges};
use crate::notification::{NotificationAction, Notifications};
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// E-mail an invitation link; returns the invited address
    async fn invite_user(&self, invitation: Invitation) -> AppResult<String>;

    /// Create the account of an invited user and attach them to the invited pharmacy
    async fn save_invited_user(&self, registration: Registration) -> AppResult<User>;

    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// All users, or those with `role`
    async fn list_users(&self, role: Option<Role>) -> AppResult<Vec<User>>;

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Delete and return the removed user
    async fn delete_user(&self, id: i32) -> AppResult<User>;

    /// Notify over the user's preferred channel
    async fn notify_user(&self, user: &User, action: NotificationAction) -> AppResult<()>;

    /// Pharmacies the user manages or works at
    async fn get_user_pharmacies(&self, id: i32) -> AppResult<Vec<i32>>;

    /// Create an administrator account
    async fn save_admin(&self, email: &str, password: &str, phone_number: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    uow: UnitOfWork,
    repo: Arc<dyn UserRepository>,
    pharmacies: Arc<dyn PharmacyClient>,
    notifications: Notifications,
    jwt: Arc<Jwt>,
    frontend_url: String,
}

impl UserManager {
    pub fn new(
        uow: UnitOfWork,
        repo: Arc<dyn UserRepository>,
        pharmacies: Arc<dyn PharmacyClient>,
        notifications: Notifications,
        jwt: Arc<Jwt>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            uow,
            repo,
            pharmacies,
            notifications,
            jwt,
            frontend_url: frontend_url.into(),
        }
    }

    fn invitation_link(&self, token: &str) -> String {
        format!(
            "{}/complete-account?token={}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }
        Ok(())
    }
}

impl HasUnitOfWork for UserManager {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }
}

#[transactional_service]
#[async_trait]
impl UserService for UserManager {
    #[transactional]
    async fn invite_user(&self, invitation: Invitation) -> AppResult<String> {
        self.ensure_email_free(&invitation.email).await?;

        let email = invitation.email.clone();
        let claims = InviteClaims::new(invitation, self.jwt.expires_at().timestamp());
        let token = self.jwt.encode(&claims)?;
        let link = self.invitation_link(&token);

        self.notifications
            .email()
            .send(&email, &NotificationAction::AccountInvite { link })
            .await?;

        tracing::info!(email = %email, role = %claims.role, "Invitation sent");
        Ok(email)
    }

    async fn save_invited_user(&self, registration: Registration) -> AppResult<User> {
        let claims: InviteClaims = self
            .jwt
            .decode(&registration.invite_token)
            .map_err(|_| AppError::bad_request("Invalid or expired invitation token"))?;

        domain::validation::validate_phone_number(&registration.phone_number)?;
        let password = Password::new(&registration.password)?;
        self.ensure_email_free(&claims.email).await?;

        let user = self
            .repo
            .create(NewUser {
                email: claims.email,
                password_hash: password.into_string(),
                phone_number: registration.phone_number,
                role: claims.role,
                notification_preference: NotificationPreference::default(),
            })
            .await?;

        if let Some(pharmacy_id) = claims.pharmacy_id {
            if user.role.is_admin() {
                tracing::warn!(user_id = user.id, "Ignoring pharmacy of an administrator invitation");
            } else {
                self.pharmacies
                    .set_user_at_pharmacy(user.id, pharmacy_id, user.role)
                    .await?;
            }
        }

        tracing::info!(user_id = user.id, role = %user.role, "Invited user registered");
        Ok(user)
    }

    #[transactional]
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    #[transactional]
    async fn list_users(&self, role: Option<Role>) -> AppResult<Vec<User>> {
        self.repo.find_by_role(role).await
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        if changes.is_empty() {
            return Err(AppError::bad_request("Nothing to update"));
        }
        if let Some(phone_number) = &changes.phone_number {
            domain::validation::validate_phone_number(phone_number)?;
        }

        self.repo.update(id, changes).await?.ok_or(AppError::NotFound)
    }

    async fn delete_user(&self, id: i32) -> AppResult<User> {
        let user = self.get_user(id).await?;
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(user)
    }

    async fn notify_user(&self, user: &User, action: NotificationAction) -> AppResult<()> {
        let recipient = match user.notification_preference {
            NotificationPreference::Email => &user.email,
            NotificationPreference::Sms => &user.phone_number,
        };

        self.notifications
            .channel(user.notification_preference)
            .send(recipient, &action)
            .await
    }

    #[transactional]
    async fn get_user_pharmacies(&self, id: i32) -> AppResult<Vec<i32>> {
        let user = self.get_user(id).await?;
        if user.role.is_admin() {
            return Ok(Vec::new());
        }

        self.pharmacies
            .get_pharmacies_by_user_and_role(user.id, user.role)
            .await
    }

    async fn save_admin(&self, email: &str, password: &str, phone_number: &str) -> AppResult<User> {
        domain::validation::validate_phone_number(phone_number)?;
        let password = Password::new(password)?;
        self.ensure_email_free(email).await?;

        let user = self
            .repo
            .create(NewUser {
                email: email.to_string(),
                password_hash: password.into_string(),
                phone_number: phone_number.to_string(),
                role: Role::Admin,
                notification_preference: NotificationPreference::default(),
            })
            .await?;

        tracing::info!(user_id = user.id, "Administrator created");
        Ok(user)
    }
}

#[transactional_service]
#[async_trait]
impl PrincipalStore for UserManager {
    #[transactional]
    async fn find_by_principal(&self, principal: &str) -> AppResult<Option<Principal>> {
        Ok(self.repo.find_by_email(principal).await?.map(|user| Principal {
            id: user.id,
            role: user.role,
            password_hash: user.password_hash,
        }))
    }
}
