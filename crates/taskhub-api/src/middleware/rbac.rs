//! Role gate wrapping the auth gateway.

use taskhub_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated caller has the admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.role.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}
