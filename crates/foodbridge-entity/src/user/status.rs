//! Verification status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::role::UserRole;

/// Admin verification state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Awaiting admin review.
    Pending,
    /// Approved.
    Verified,
    /// Declined by an admin.
    Rejected,
}

impl VerificationStatus {
    /// Status assigned at registration.
    ///
    /// Charities start pending; donors are implicitly verified and admins
    /// bypass verification.
    pub fn initial_for(role: UserRole) -> Self {
        if role.requires_verification() {
            Self::Pending
        } else {
            Self::Verified
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(foodbridge_core::AppError::invalid_field(
                "status",
                format!("Invalid status value: '{s}'. Expected one of: pending, verified, rejected"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_per_role() {
        assert_eq!(
            VerificationStatus::initial_for(UserRole::Charity),
            VerificationStatus::Pending
        );
        assert_eq!(
            VerificationStatus::initial_for(UserRole::Donor),
            VerificationStatus::Verified
        );
        assert_eq!(
            VerificationStatus::initial_for(UserRole::Admin),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn test_from_str_is_exact() {
        assert_eq!(
            "rejected".parse::<VerificationStatus>().unwrap(),
            VerificationStatus::Rejected
        );
        assert!("Verified".parse::<VerificationStatus>().is_err());
        assert!("active".parse::<VerificationStatus>().is_err());
    }
}
