//! Field validation rules shared by the service DTOs.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    FORBIDDEN_FILENAME_CHARS, IMAGE_EXTENSIONS, MAX_FILENAME_LENGTH, MIN_PASSWORD_LENGTH,
    PHONE_NUMBER_PATTERN,
};
use crate::error::{DomainError, DomainResult};

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_NUMBER_PATTERN).expect("valid phone number regex"));

pub fn validate_phone_number(phone: &str) -> DomainResult<()> {
    if PHONE_NUMBER_RE.is_match(phone) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "Phone number must be +4 followed by 10 digits",
        ))
    }
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::password(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Check an uploaded image name and return its extension.
pub fn validate_image_filename(filename: &str) -> DomainResult<&str> {
    let ext = filename.rsplit('.').next().unwrap_or_default();
    if !IMAGE_EXTENSIONS.contains(&ext) {
        return Err(DomainError::validation(format!(
            "File extension must be one of: {}, received: {}",
            IMAGE_EXTENSIONS.join(", "),
            ext
        )));
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Filename must not exceed {} characters",
            MAX_FILENAME_LENGTH
        )));
    }

    if filename.starts_with('.') || filename.starts_with('_') {
        return Err(DomainError::validation(
            "Filename must not start with '.' or '_'",
        ));
    }

    if !filename.is_ascii() {
        return Err(DomainError::validation(
            "Filename must contain only ASCII characters",
        ));
    }

    if filename.chars().any(|c| FORBIDDEN_FILENAME_CHARS.contains(&c)) {
        let forbidden: String = FORBIDDEN_FILENAME_CHARS.iter().collect();
        return Err(DomainError::validation(format!(
            "Filename must not contain any of: {}",
            forbidden
        )));
    }

    Ok(ext)
}

/// Expiration dates must lie strictly in the future.
pub fn validate_future_date(date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if date <= today {
        return Err(DomainError::validation(
            "Expiration date must be in the future",
        ));
    }
    Ok(())
}
