//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodbridge_core::{Outcome, SideEffectWarning};
use foodbridge_entity::user::{OrganizationDetails, User, UserAddress};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Side effects that failed after the change was committed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SideEffectWarning>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            warnings: Vec::new(),
        }
    }
}

impl<T: Serialize> From<Outcome<T>> for ApiResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        let (data, warnings) = outcome.into_parts();
        Self {
            success: true,
            data,
            warnings,
        }
    }
}

/// User profile as returned to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    /// Derived from `status`.
    pub is_verified: bool,
    pub phone: Option<String>,
    pub address: UserAddress,
    pub organization_details: OrganizationDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            is_verified: user.is_verified(),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            status: user.status.to_string(),
            phone: user.phone,
            address: user.address,
            organization_details: user.organization,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Store backend state.
    pub database: String,
}
