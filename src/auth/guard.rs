//! Admin access guard
//!
//! Runs at the boundary in front of every privileged operation. The admin
//! service does not call it, so it stays usable from non-HTTP callers.

use super::jwt::AuthError;

/// Role that unlocks admin operations. Compared exactly, case included.
pub const ADMIN_ROLE: &str = "admin";

/// Allow the call only when `caller_role` is exactly `"admin"`.
pub fn authorize(caller_role: &str) -> Result<(), AuthError> {
    if caller_role == ADMIN_ROLE {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            role: caller_role.to_string(),
        })
    }
}
