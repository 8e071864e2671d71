//! User roles and notification channels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};
use crate::error::DomainError;

/// Role carried by every user and every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Manager => ROLE_MANAGER,
            Role::Employee => ROLE_EMPLOYEE,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Parse a role name. Case-insensitive, so "admin" and "ADMIN" are equal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_EMPLOYEE => Ok(Role::Employee),
            _ => Err(DomainError::validation(format!("Invalid role: {}", s))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Channel used to notify a user about account events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationPreference {
    #[default]
    Email,
    Sms,
}

impl NotificationPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPreference::Email => "EMAIL",
            NotificationPreference::Sms => "SMS",
        }
    }
}

impl FromStr for NotificationPreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EMAIL" => Ok(NotificationPreference::Email),
            "SMS" => Ok(NotificationPreference::Sms),
            _ => Err(DomainError::validation(format!(
                "Invalid notification preference: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for NotificationPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
