//! Food category of a donation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use foodbridge_core::AppError;

/// Broad category of the donated food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "food_type")]
pub enum FoodType {
    Cooked,
    Raw,
    Packaged,
    Beverages,
    Other,
}

impl FoodType {
    /// Every food type, in reporting order.
    pub const ALL: [FoodType; 5] = [
        Self::Cooked,
        Self::Raw,
        Self::Packaged,
        Self::Beverages,
        Self::Other,
    ];

    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cooked => "Cooked",
            Self::Raw => "Raw",
            Self::Packaged => "Packaged",
            Self::Beverages => "Beverages",
            Self::Other => "Other",
        }
    }

    /// Comma-separated list of accepted values, for error messages.
    pub fn allowed() -> String {
        Self::ALL.map(|t| t.as_str()).join(", ")
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                AppError::invalid_field(
                    "foodType",
                    format!("Invalid foodType '{s}'; expected one of: {}", Self::allowed()),
                )
            })
    }
}
