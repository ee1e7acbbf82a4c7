//! # foodbridge-auth
//!
//! Credential handling for FoodBridge.
//!
//! ## Modules
//!
//! - `jwt`: bearer token validation
//! - `password`: Argon2id password hashing and policy enforcement
//!
//! Tokens are issued by an external account service; this crate only
//! validates them.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder};
pub use password::{PasswordHasher, PasswordValidator};
