//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Verifies charities and manages records.
    Admin,
    /// Lists surplus food.
    Donor,
    /// Accepts donations once verified by an admin.
    Charity,
}

impl UserRole {
    /// All roles, in display order.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Donor, Self::Charity];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether accounts with this role go through admin verification.
    pub fn requires_verification(&self) -> bool {
        matches!(self, Self::Charity)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Donor => "donor",
            Self::Charity => "charity",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "donor" => Ok(Self::Donor),
            "charity" => Ok(Self::Charity),
            _ => Err(foodbridge_core::AppError::invalid_field(
                "role",
                format!("Invalid user role: '{s}'. Expected one of: admin, donor, charity"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_charity_requires_verification() {
        assert!(UserRole::Charity.requires_verification());
        assert!(!UserRole::Donor.requires_verification());
        assert!(!UserRole::Admin.requires_verification());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("CHARITY".parse::<UserRole>().unwrap(), UserRole::Charity);
        let err = "manager".parse::<UserRole>().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("role"));
    }
}
