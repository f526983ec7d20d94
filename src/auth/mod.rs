//! Authentication and authorization
//!
//! JWT verification resolves the caller; the guard decides whether that
//! caller may use admin operations.

pub mod guard;
pub mod jwt;
pub mod middleware;

pub use guard::{authorize, ADMIN_ROLE};
#[cfg(test)]
pub use jwt::create_token;
pub use jwt::{verify_token, AuthError, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthState, AuthenticatedUser, Caller};
