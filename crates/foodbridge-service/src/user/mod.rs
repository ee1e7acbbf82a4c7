//! Registration, profile self-service and admin user management.

pub mod admin;
pub mod service;

pub use admin::{AdminUserService, DeletedUser};
pub use service::{RegisterRequest, UserService, normalize_email};
