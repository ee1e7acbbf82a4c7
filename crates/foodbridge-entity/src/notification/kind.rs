//! Notification type tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to a donor after they list a donation.
    DonationCreated,
    /// Sent to verified charities in the pickup city.
    NewDonation,
    /// Sent to a donor when a charity accepts their donation.
    DonationAccepted,
    /// Sent to a charity when an admin verifies it.
    CharityVerified,
}

impl NotificationKind {
    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DonationCreated => "donation_created",
            Self::NewDonation => "new_donation",
            Self::DonationAccepted => "donation_accepted",
            Self::CharityVerified => "charity_verified",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
