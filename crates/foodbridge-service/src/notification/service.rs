//! Notification persistence and read-state management.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_database::store::NotificationStore;
use foodbridge_entity::notification::{NewNotification, Notification};

use crate::context::RequestContext;

/// Manages in-app notifications.
#[derive(Clone)]
pub struct NotificationService {
    /// Notification store.
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Persists one unread notification.
    ///
    /// Fails with `Dependency` when the recipient does not exist or the
    /// store rejects the write.
    pub async fn create_notification(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = Notification::from_new(new);
        self.store.insert(&notification).await?;

        debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            kind = %notification.kind,
            "Notification created"
        );
        Ok(notification)
    }

    /// Lists unread notifications for the current user, newest first.
    pub async fn list_unread(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.store.list_unread(ctx.user_id).await
    }

    /// Marks a notification as read. Repeating the call is harmless.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let notification = self
            .store
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.recipient_id != ctx.user_id {
            return Err(AppError::authorization(
                "Cannot modify another user's notification",
            ));
        }
        if notification.is_read {
            return Ok(notification);
        }

        let updated = self
            .store
            .mark_read(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        info!(user_id = %ctx.user_id, notification_id = %notification_id, "Notification marked read");
        Ok(updated)
    }
}
