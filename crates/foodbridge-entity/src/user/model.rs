//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::VerificationStatus;

/// A registered account: donor, charity, or admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Person or organization name.
    pub name: String,
    /// Unique email, stored trimmed and lowercased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Admin verification state.
    pub status: VerificationStatus,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Registered address. The city drives new-donation alerts for charities.
    #[sqlx(flatten)]
    #[serde(default)]
    pub address: UserAddress,
    /// Charity organization details.
    #[sqlx(flatten)]
    #[serde(default)]
    pub organization: OrganizationDetails,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account is verified.
    ///
    /// Derived from `status` alone; there is no separately stored flag.
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this account may accept donations right now.
    pub fn is_verified_charity(&self) -> bool {
        self.role == UserRole::Charity && self.is_verified()
    }
}

/// Postal address on a user profile; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAddress {
    /// Street line.
    #[sqlx(rename = "address_street")]
    pub street: Option<String>,
    /// City.
    #[sqlx(rename = "address_city")]
    pub city: Option<String>,
    /// State or region.
    #[sqlx(rename = "address_state")]
    pub state: Option<String>,
    /// Postal code.
    #[sqlx(rename = "address_zip_code")]
    pub zip_code: Option<String>,
    /// Country.
    #[sqlx(rename = "address_country")]
    pub country: Option<String>,
}

impl UserAddress {
    /// Overlay the parts present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: UserAddress) {
        if patch.street.is_some() {
            self.street = patch.street;
        }
        if patch.city.is_some() {
            self.city = patch.city;
        }
        if patch.state.is_some() {
            self.state = patch.state;
        }
        if patch.zip_code.is_some() {
            self.zip_code = patch.zip_code;
        }
        if patch.country.is_some() {
            self.country = patch.country;
        }
    }
}

/// Registration details a charity supplies for review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetails {
    /// Official registration number.
    #[sqlx(rename = "org_registration_number")]
    pub registration_number: Option<String>,
    /// Free-text description.
    #[sqlx(rename = "org_description")]
    pub description: Option<String>,
    /// Website URL.
    #[sqlx(rename = "org_website")]
    pub website: Option<String>,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    /// New name.
    pub name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// Address parts to overlay.
    pub address: Option<UserAddress>,
    /// Replacement organization details.
    pub organization: Option<OrganizationDetails>,
}
