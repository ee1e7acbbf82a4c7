//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// An in-app notice for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub recipient_id: Uuid,
    /// What triggered it.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Donation the notice is about, if any.
    pub related_donation_id: Option<Uuid>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification from its parts.
    pub fn from_new(new: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id: new.recipient_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            related_donation_id: new.related_donation_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_donation_id: Option<Uuid>,
}

impl NewNotification {
    /// Start a notification for `recipient_id`.
    pub fn new(
        recipient_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            kind,
            title: title.into(),
            message: message.into(),
            related_donation_id: None,
        }
    }

    /// Attach the donation this notice is about.
    pub fn about(mut self, donation_id: Uuid) -> Self {
        self.related_donation_id = Some(donation_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let recipient = Uuid::new_v4();
        let donation = Uuid::new_v4();
        let n = Notification::from_new(
            NewNotification::new(recipient, NotificationKind::NewDonation, "t", "m").about(donation),
        );
        assert!(!n.is_read);
        assert_eq!(n.recipient_id, recipient);
        assert_eq!(n.related_donation_id, Some(donation));
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let n = Notification::from_new(NewNotification::new(
            Uuid::new_v4(),
            NotificationKind::CharityVerified,
            "t",
            "m",
        ));
        let json = serde_json::to_value(n).unwrap();
        assert_eq!(json["type"], "charity_verified");
        assert_eq!(json["isRead"], false);
    }
}
