//! `validator` custom rules backed by the domain validators.
//!
//! Use with `#[validate(custom(function = "common::validation::phone_number"))]`.

use std::borrow::Cow;

use domain::{validation, DomainError, NotificationPreference, Role};
use validator::ValidationError;

fn to_validation_error(code: &'static str, err: DomainError) -> ValidationError {
    let message = match err {
        DomainError::Validation(msg) | DomainError::Password(msg) => msg,
        other => other.to_string(),
    };
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    validation::validate_phone_number(value).map_err(|e| to_validation_error("phone_number", e))
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    validation::validate_password(value).map_err(|e| to_validation_error("password", e))
}

pub fn role(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Role>()
        .map(|_| ())
        .map_err(|e| to_validation_error("role", e))
}

pub fn notification_preference(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<NotificationPreference>()
        .map(|_| ())
        .map_err(|e| to_validation_error("notification_preference", e))
}
