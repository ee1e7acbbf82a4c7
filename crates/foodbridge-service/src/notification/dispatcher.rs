//! Best-effort delivery of lifecycle side effects.
//!
//! The primary state change has already committed when these run, so every
//! failure is logged and collected as a [`SideEffectWarning`] instead of
//! being returned as an error.

use std::sync::Arc;

use tracing::warn;

use foodbridge_core::traits::{Mailer, OutgoingMail};
use foodbridge_core::SideEffectWarning;
use foodbridge_entity::notification::NewNotification;

use super::service::NotificationService;

/// Sends in-app notifications and mail, collecting failures as warnings.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: NotificationService,
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given notification service and mailer.
    pub fn new(notifications: NotificationService, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            notifications,
            mailer,
        }
    }

    /// Persist one notification; a failure is pushed onto `warnings`.
    pub async fn notify(&self, new: NewNotification, warnings: &mut Vec<SideEffectWarning>) {
        let effect = format!("notification:{}", new.kind);
        let recipient_id = new.recipient_id;
        if let Err(e) = self.notifications.create_notification(new).await {
            warn!(
                effect = %effect,
                recipient_id = %recipient_id,
                error = %e.detail_chain(),
                "Failed to create notification"
            );
            warnings.push(SideEffectWarning::from_error(effect, &e));
        }
    }

    /// Send one mail; a failure is pushed onto `warnings`.
    pub async fn mail(
        &self,
        effect: &str,
        mail: OutgoingMail,
        warnings: &mut Vec<SideEffectWarning>,
    ) {
        let effect = format!("mail:{effect}");
        if let Err(e) = self.mailer.send(&mail).await {
            warn!(
                effect = %effect,
                to = %mail.to,
                error = %e.detail_chain(),
                "Failed to send mail"
            );
            warnings.push(SideEffectWarning::from_error(effect, &e));
        }
    }
}
