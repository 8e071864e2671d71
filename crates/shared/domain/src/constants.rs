//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

pub const ROLE_ADMIN: &str = "ADMIN";

pub const ROLE_MANAGER: &str = "MANAGER";

pub const ROLE_EMPLOYEE: &str = "EMPLOYEE";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_EMPLOYEE];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Romanian mobile numbers: `+4` followed by ten digits
pub const PHONE_NUMBER_PATTERN: &str = r"^\+4\d{10}$";

/// Accepted image extensions for medication pictures
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpeg", "jpg"];

/// Maximum length of an uploaded file name
pub const MAX_FILENAME_LENGTH: usize = 250;

/// Characters never accepted in an uploaded file name
pub const FORBIDDEN_FILENAME_CHARS: &[char] = &[
    ' ', '!', '@', '#', '$', '%', '[', ']', ':', '{', '}', '?', '*', '\\',
];

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Reporting
// =============================================================================

/// Default number of entries in the most-sold report
pub const DEFAULT_MOST_SOLD: u64 = 3;

/// Default window of the sales trend report, in days
pub const DEFAULT_TREND_DAYS: i64 = 7;

/// Longest window of the sales trend report, in days
pub const MAX_TREND_DAYS: i64 = 3650;
