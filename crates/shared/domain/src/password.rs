//! Password value object.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};
use crate::validation::validate_password;

/// Argon2 hash of a user password.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password (minimum 8 characters).
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        validate_password(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DomainError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("SecurePassword123!").unwrap();

        assert!(password.verify("SecurePassword123!"));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let hash = Password::new("TestPassword123").unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("TestPassword123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword123").unwrap();
        let pass2 = Password::new("SamePassword123").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify("SamePassword123"));
        assert!(pass2.verify("SamePassword123"));
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(Password::new("short"), Err(DomainError::Password(_))));
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!Password::from_hash("not-a-hash".to_string()).verify("anything"));
    }
}
