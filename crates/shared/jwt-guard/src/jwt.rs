//! JWT encoding and decoding.

use chrono::{DateTime, Duration, Utc};
use common::{AppResult, JwtConfig};
use domain::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Claims of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and verifies tokens with a shared secret.
#[derive(Clone)]
pub struct Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl std::fmt::Debug for Jwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jwt")
            .field("algorithm", &self.algorithm)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl Jwt {
    /// HS256 signer for `secret`, issuing tokens valid for `lifetime`.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256, lifetime)
    }

    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm,
            lifetime,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(config.secret.as_bytes(), Duration::hours(config.expiration_hours))
    }

    /// Expiration instant of a token issued now.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc::now() + self.lifetime
    }

    /// Sign any serializable payload. The payload must carry its own `exp`.
    pub fn encode<T: Serialize>(&self, claims: &T) -> AppResult<String> {
        Ok(encode(&Header::new(self.algorithm), claims, &self.encoding)?)
    }

    /// Verify signature and expiry and return the payload.
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> AppResult<T> {
        let data = decode::<T>(token, &self.decoding, &Validation::new(self.algorithm))?;
        Ok(data.claims)
    }

    /// Issue an access token for a principal.
    pub fn issue(&self, id: i32, role: Role) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.lifetime;
        let claims = Claims {
            id,
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };
        Ok((self.encode(&claims)?, expires_at))
    }
}
