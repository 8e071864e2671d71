//! JWT authentication shared by the services.
//!
//! - `Jwt`: signs and verifies tokens
//! - `TokenIssuer`: checks credentials from a `PrincipalStore` and issues tokens
//! - `authorize`: bearer middleware placing a `CurrentUser` in request extensions
//! - `token_routes`: the `/token` and `/token/verify` endpoints

pub mod guard;
pub mod issuer;
pub mod jwt;
pub mod routes;

pub use guard::{authorize, Authorize, CurrentUser, JwtGuard};
pub use issuer::{Principal, PrincipalStore, TokenIn, TokenIssuer, TokenOut, VerifyOut};
pub use jwt::{Claims, Jwt};
pub use routes::token_routes;

#[cfg(any(test, feature = "test-utils"))]
pub use issuer::MockPrincipalStore;
