//! Quantity units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use foodbridge_core::AppError;

/// Unit in which a donation quantity is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quantity_unit", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    Kg,
    Items,
    Packages,
    Liters,
}

impl QuantityUnit {
    /// Every unit.
    pub const ALL: [QuantityUnit; 4] = [Self::Kg, Self::Items, Self::Packages, Self::Liters];

    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Items => "items",
            Self::Packages => "packages",
            Self::Liters => "liters",
        }
    }

    /// Comma-separated list of accepted values, for error messages.
    pub fn allowed() -> String {
        Self::ALL.map(|u| u.as_str()).join(", ")
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_field(
                    "quantityUnit",
                    format!("Invalid quantityUnit '{s}'; expected one of: {}", Self::allowed()),
                )
            })
    }
}
