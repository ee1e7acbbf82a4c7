//! Convenience result type alias for FoodBridge.

use crate::error::AppError;

/// A specialized `Result` type for FoodBridge operations.
pub type AppResult<T> = Result<T, AppError>;
