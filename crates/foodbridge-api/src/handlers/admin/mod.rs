//! Admin-only handlers.

pub mod donations;
pub mod reports;
pub mod users;
