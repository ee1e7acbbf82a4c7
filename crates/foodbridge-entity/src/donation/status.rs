//! Donation lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use foodbridge_core::AppError;

/// Lifecycle status of a donation.
///
/// `Pending` exists only so that older rows still decode; nothing assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "donation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Available,
    Accepted,
    Completed,
    Expired,
}

impl DonationStatus {
    /// Every status, in reporting order.
    pub const ALL: [DonationStatus; 5] = [
        Self::Pending,
        Self::Available,
        Self::Accepted,
        Self::Completed,
        Self::Expired,
    ];

    /// Return the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Available => "available",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::invalid_field("status", format!("Invalid status value: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        for status in DonationStatus::ALL {
            assert_eq!(status.as_str().parse::<DonationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "cancelled".parse::<DonationStatus>().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("status"));
    }
}
