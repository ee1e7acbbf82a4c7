//! Donation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::food_type::FoodType;
use super::status::DonationStatus;
use super::unit::QuantityUnit;

/// A listing of surplus food offered by a donor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Unique donation identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Owning donor. Never changes after creation.
    pub donor_id: Uuid,
    /// Charity that accepted the donation.
    pub accepted_by: Option<Uuid>,
    /// When the donation was accepted.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Stored lifecycle status. Use [`Donation::effective_status`] for display.
    pub status: DonationStatus,
    /// Food category.
    pub food_type: FoodType,
    /// Amount offered, non-negative.
    pub quantity: f64,
    /// Unit of `quantity`.
    pub quantity_unit: QuantityUnit,
    /// After this instant the food is no longer offered.
    pub expiry_date: DateTime<Utc>,
    /// Where to collect the food.
    #[sqlx(flatten)]
    pub pickup_address: PickupAddress,
    /// When the food can be collected.
    #[sqlx(flatten)]
    pub pickup_time_slot: PickupTimeSlot,
    /// Notes for the collecting charity.
    pub special_instructions: Option<String>,
    /// Image references.
    #[serde(default)]
    pub images: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Whether the expiry date has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }

    /// Status as observed at `now`: `Expired` once the expiry date has
    /// passed, otherwise the stored status.
    pub fn effective_status(&self, now: DateTime<Utc>) -> DonationStatus {
        if self.is_expired_at(now) {
            DonationStatus::Expired
        } else {
            self.status
        }
    }

    /// Copy of this donation with `status` replaced by the effective status.
    pub fn observed_at(mut self, now: DateTime<Utc>) -> Self {
        self.status = self.effective_status(now);
        self
    }

    /// Whether `user_id` may change this donation's status: the donor, or
    /// the charity that accepted it.
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.donor_id == user_id || self.accepted_by == Some(user_id)
    }
}

/// Pickup location. Every part is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PickupAddress {
    #[sqlx(rename = "pickup_street")]
    pub street: String,
    #[sqlx(rename = "pickup_city")]
    pub city: String,
    #[sqlx(rename = "pickup_state")]
    pub state: String,
    #[sqlx(rename = "pickup_zip_code")]
    pub zip_code: String,
}

/// Pickup window, as free-form time strings (e.g. `"10:00"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PickupTimeSlot {
    #[sqlx(rename = "pickup_from")]
    pub from: String,
    #[sqlx(rename = "pickup_to")]
    pub to: String,
}

/// Unvalidated donation input as submitted by a donor.
///
/// Every field is optional so that validation can name the first missing one.
/// A submitted `status` is accepted and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub food_type: Option<String>,
    pub quantity: Option<f64>,
    pub quantity_unit: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD` date.
    pub expiry_date: Option<String>,
    pub pickup_address: Option<CreatePickupAddress>,
    pub pickup_time_slot: Option<CreatePickupTimeSlot>,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: Option<String>,
}

/// Unvalidated pickup address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePickupAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Unvalidated pickup window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePickupTimeSlot {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn donation(status: DonationStatus, expiry: DateTime<Utc>) -> Donation {
        let now = Utc::now();
        Donation {
            id: Uuid::new_v4(),
            title: "Rice".to_string(),
            description: "Cooked rice".to_string(),
            donor_id: Uuid::new_v4(),
            accepted_by: None,
            accepted_at: None,
            status,
            food_type: FoodType::Cooked,
            quantity: 5.0,
            quantity_unit: QuantityUnit::Kg,
            expiry_date: expiry,
            pickup_address: PickupAddress::default(),
            pickup_time_slot: PickupTimeSlot::default(),
            special_instructions: None,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_effective_status_before_expiry() {
        let now = Utc::now();
        let d = donation(DonationStatus::Accepted, now + Duration::hours(1));
        assert_eq!(d.effective_status(now), DonationStatus::Accepted);
    }

    #[test]
    fn test_effective_status_after_expiry() {
        let now = Utc::now();
        for status in DonationStatus::ALL {
            let d = donation(status, now - Duration::seconds(1));
            assert_eq!(d.effective_status(now), DonationStatus::Expired);
        }
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let d = donation(DonationStatus::Available, now);
        assert!(!d.is_expired_at(now));
        assert_eq!(d.effective_status(now), DonationStatus::Available);
    }

    #[test]
    fn test_is_party() {
        let mut d = donation(DonationStatus::Available, Utc::now());
        let charity = Uuid::new_v4();
        assert!(d.is_party(d.donor_id));
        assert!(!d.is_party(charity));
        d.accepted_by = Some(charity);
        assert!(d.is_party(charity));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(donation(DonationStatus::Available, Utc::now())).unwrap();
        assert_eq!(json["foodType"], "Cooked");
        assert_eq!(json["quantityUnit"], "kg");
        assert_eq!(json["status"], "available");
        assert!(json["pickupAddress"].get("zipCode").is_some());
    }
}
