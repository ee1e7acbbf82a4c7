//! Request context carrying the authenticated actor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_entity::user::{User, UserRole, VerificationStatus};

/// Context for the current authenticated request.
///
/// Built from the user record as it is stored *now*, so verification
/// changes take effect on the next request without reissuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The user's current verification status.
    pub status: VerificationStatus,
}

impl RequestContext {
    /// Creates a context for `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            status: user.status,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is verified.
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    /// Fail with `Authorization` unless the actor is an admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin access required"))
        }
    }

    /// Fail with `Authorization` unless the actor has `role`.
    pub fn require_role(&self, role: UserRole) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only {role} accounts can perform this action"
            )))
        }
    }
}
