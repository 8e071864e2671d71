//! Stock and sales rules.

use chrono::{DateTime, Duration, Utc};

use crate::constants::MAX_TREND_DAYS;
use crate::error::{DomainError, DomainResult};

/// Stock left after selling `requested` units out of `in_stock`.
pub fn deduct_stock(medication_id: i32, in_stock: i32, requested: i32) -> DomainResult<i32> {
    if requested <= 0 {
        return Err(DomainError::validation("Quantity must be positive"));
    }
    if in_stock < requested {
        return Err(DomainError::InsufficientInventory(medication_id));
    }
    Ok(in_stock - requested)
}

/// `unit_price * quantity` in minor units.
pub fn line_total(unit_price: i64, quantity: i32) -> DomainResult<i64> {
    if unit_price <= 0 {
        return Err(DomainError::validation("Unit price must be positive"));
    }
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or_else(|| DomainError::validation("Sale total is too large"))
}

/// Start of a sales trend window of `days` days ending at `now`.
pub fn trend_window_start(now: DateTime<Utc>, days: i64) -> DomainResult<DateTime<Utc>> {
    if !(1..=MAX_TREND_DAYS).contains(&days) {
        return Err(DomainError::validation(format!(
            "days must be between 1 and {}",
            MAX_TREND_DAYS
        )));
    }
    Duration::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| DomainError::validation("days is out of range"))
}
