//! Token issuing against a principal store.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, AppResult};
use domain::{Password, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::jwt::Jwt;

/// Hash verified when the principal is unknown, so both paths cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$3cZ6q8xj0hEf9cG8TqvXbWQz9Zr8e2a1Sx7bYk4mN0E";

/// Credentials record of an account that can obtain tokens.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i32,
    pub role: Role,
    pub password_hash: String,
}

/// Lookup of principals by their login name.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_by_principal(&self, principal: &str) -> AppResult<Option<Principal>>;
}

/// Token request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TokenIn {
    #[schema(example = "manager@pharmacy.ro")]
    pub principal: String,
    pub password: String,
}

/// Issued token and its expiry as a unix timestamp.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TokenOut {
    pub token: String,
    pub expires_at: i64,
}

/// Verify response.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct VerifyOut {
    pub expires_at: i64,
}

/// Checks credentials and signs access tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<dyn PrincipalStore>,
    jwt: Arc<Jwt>,
}

impl TokenIssuer {
    pub fn new(store: Arc<dyn PrincipalStore>, jwt: Arc<Jwt>) -> Self {
        Self { store, jwt }
    }

    pub fn jwt(&self) -> &Arc<Jwt> {
        &self.jwt
    }

    pub async fn obtain_token(&self, payload: TokenIn) -> AppResult<TokenOut> {
        let principal = self.store.find_by_principal(&payload.principal).await?;

        let hash = principal
            .as_ref()
            .map(|p| p.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(hash).verify(&payload.password);

        let principal = match principal {
            Some(principal) if password_valid => principal,
            _ => {
                tracing::debug!("Rejected token request for {}", payload.principal);
                return Err(AppError::InvalidCredentials);
            }
        };

        let (token, expires_at) = self.jwt.issue(principal.id, principal.role)?;
        tracing::info!(user_id = principal.id, "Token issued");

        Ok(TokenOut {
            token,
            expires_at: expires_at.timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mockall::predicate::function;

    use crate::jwt::Claims;

    fn jwt() -> Arc<Jwt> {
        Arc::new(Jwt::new(b"test-secret-key-that-is-32-bytes!!", Duration::hours(1)))
    }

    fn request(password: &str) -> TokenIn {
        TokenIn {
            principal: "ana@pharmacy.ro".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_obtain_token_success() {
        let hash = Password::new("password123").unwrap().into_string();
        let mut store = MockPrincipalStore::new();
        store
            .expect_find_by_principal()
            .with(function(|principal: &str| principal == "ana@pharmacy.ro"))
            .times(1)
            .returning(move |_| {
                Ok(Some(Principal {
                    id: 3,
                    role: Role::Employee,
                    password_hash: hash.clone(),
                }))
            });

        let jwt = jwt();
        let issuer = TokenIssuer::new(Arc::new(store), jwt.clone());
        let out = issuer.obtain_token(request("password123")).await.unwrap();

        let claims: Claims = jwt.decode(&out.token).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.exp, out.expires_at);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let hash = Password::new("password123").unwrap().into_string();
        let mut store = MockPrincipalStore::new();
        store.expect_find_by_principal().returning(move |_| {
            Ok(Some(Principal {
                id: 3,
                role: Role::Employee,
                password_hash: hash.clone(),
            }))
        });

        let issuer = TokenIssuer::new(Arc::new(store), jwt());
        let err = issuer.obtain_token(request("wrong-password")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_principal_is_rejected() {
        let mut store = MockPrincipalStore::new();
        store.expect_find_by_principal().returning(|_| Ok(None));

        let issuer = TokenIssuer::new(Arc::new(store), jwt());
        let err = issuer.obtain_token(request("password123")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }
}
