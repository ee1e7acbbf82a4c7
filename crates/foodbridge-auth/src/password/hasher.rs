//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher as ArgonHasher, SaltString, rand_core::OsRng},
};

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;

/// Hashes account passwords using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password with a random salt, returning the PHC string.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }
}
