//! Request DTOs.
//!
//! Bodies for registration, profile and donation creation reuse the
//! service input types; only query strings and small bodies live here.

use serde::{Deserialize, Serialize};

/// Body of `PUT /api/donations/{id}/status` and `PATCH /api/admin/users/{id}/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusRequest {
    /// Requested status value.
    pub status: Option<String>,
}

/// Query of `GET /api/donations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonationQuery {
    /// Effective status filter.
    pub status: Option<String>,
    /// Pickup city filter.
    pub city: Option<String>,
}

/// Query of `GET /api/admin/donations`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDonationQuery {
    /// Effective status filter; `all` means none.
    pub status: Option<String>,
}

/// Query of `GET /api/admin/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Role filter; `all` means none.
    pub role: Option<String>,
}
