//! # foodbridge-core
//!
//! Core crate for FoodBridge. Contains configuration schemas, the outbound
//! mail trait, the `Outcome` wrapper for results that carry non-fatal
//! side-effect warnings, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FoodBridge crates.

pub mod config;
pub mod error;
pub mod outcome;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use outcome::{Outcome, SideEffectWarning};
pub use result::AppResult;
