//! Bearer token middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use common::{AppError, AppResult};
use domain::{Role, BEARER_TOKEN_PREFIX};

use crate::jwt::{Claims, Jwt};

/// Current authenticated user extracted from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub role: Role,
    pub expires_at: i64,
}

impl CurrentUser {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

/// Predicate a decoded token must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorize {
    /// Any valid token
    Authenticated,
    /// Tokens of one role only
    Role(Role),
}

impl Authorize {
    pub fn permits(&self, claims: &Claims) -> bool {
        match self {
            Authorize::Authenticated => true,
            Authorize::Role(role) => claims.role == *role,
        }
    }
}

/// Middleware state: the verifier and the predicate of one route group.
#[derive(Debug, Clone)]
pub struct JwtGuard {
    jwt: Arc<Jwt>,
    authorize: Authorize,
}

impl JwtGuard {
    pub fn new(jwt: Arc<Jwt>, authorize: Authorize) -> Self {
        Self { jwt, authorize }
    }

    pub fn authenticated(jwt: Arc<Jwt>) -> Self {
        Self::new(jwt, Authorize::Authenticated)
    }

    pub fn role(jwt: Arc<Jwt>, role: Role) -> Self {
        Self::new(jwt, Authorize::Role(role))
    }

    /// Decode `token` and check the predicate.
    pub fn check(&self, token: &str) -> AppResult<CurrentUser> {
        let claims: Claims = self.jwt.decode(token)?;
        if !self.authorize.permits(&claims) {
            tracing::debug!(user_id = claims.id, role = %claims.role, "Token not authorized");
            return Err(AppError::Unauthorized);
        }
        Ok(CurrentUser::from(claims))
    }
}

/// Authentication middleware; use with `middleware::from_fn_with_state(guard, authorize)`.
pub async fn authorize(
    State(guard): State<JwtGuard>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;
    let current_user = guard.check(&token)?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<String> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
