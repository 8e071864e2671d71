//! User entity and related types.

use domain::{NotificationPreference, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub role: Role,
    pub notification_preference: NotificationPreference,
}

/// Data required to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub role: Role,
    pub notification_preference: NotificationPreference,
}

/// Partial update of a user, applied by administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub phone_number: Option<String>,
    pub role: Option<Role>,
    pub notification_preference: Option<NotificationPreference>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.phone_number.is_none() && self.role.is_none() && self.notification_preference.is_none()
    }
}

/// Invitation issued by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub pharmacy_id: Option<i32>,
}

/// Account completion by an invited user.
#[derive(Debug, Clone)]
pub struct Registration {
    pub invite_token: String,
    pub password: String,
    pub phone_number: String,
}

/// Payload of an invitation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteClaims {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_id: Option<i32>,
    pub exp: i64,
}

impl InviteClaims {
    pub fn new(invitation: Invitation, exp: i64) -> Self {
        Self {
            email: invitation.email,
            name: invitation.name,
            role: invitation.role,
            pharmacy_id: invitation.pharmacy_id,
            exp,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserOut {
    pub id: i32,
    #[schema(example = "ana.popescu@pharmacy.ro")]
    pub email: String,
    #[schema(example = "+40712345678")]
    pub phone_number: String,
    pub role: Role,
    pub notification_preference: NotificationPreference,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
            notification_preference: user.notification_preference,
        }
    }
}
