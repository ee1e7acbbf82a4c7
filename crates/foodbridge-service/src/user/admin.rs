//! Admin account management: charity verification, status changes,
//! listing and removal.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_core::Outcome;
use foodbridge_database::store::UserStore;
use foodbridge_entity::user::{User, UserRole, VerificationStatus};

use crate::context::RequestContext;
use crate::notification::{NotificationDispatcher, templates};

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Notification and mail delivery.
    dispatcher: NotificationDispatcher,
}

/// Result of removing a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUser {
    pub user_id: Uuid,
    pub donations_removed: u64,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserStore>, dispatcher: NotificationDispatcher) -> Self {
        Self { users, dispatcher }
    }

    /// Lists users, newest first. Never modifies any record.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        role: Option<&str>,
    ) -> AppResult<Vec<User>> {
        ctx.require_admin()?;
        let role = match role.map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(r) => Some(r.parse::<UserRole>()?),
        };
        self.users.list(role).await
    }

    /// Marks a charity as verified and tells it so in-app and by mail.
    pub async fn verify_charity(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> AppResult<Outcome<User>> {
        ctx.require_admin()?;

        let user = self.load(user_id).await?;
        if user.role != UserRole::Charity {
            return Err(AppError::validation("Only charity accounts can be verified"));
        }

        let charity = self
            .users
            .set_status(user_id, VerificationStatus::Verified)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(admin_id = %ctx.user_id, charity_id = %user_id, "Charity verified");

        let mut warnings = Vec::new();
        self.dispatcher
            .notify(templates::charity_verified(&charity), &mut warnings)
            .await;
        self.dispatcher
            .mail(
                "charity_verified",
                templates::charity_verified_mail(&charity),
                &mut warnings,
            )
            .await;

        Ok(Outcome::with_warnings(charity, warnings))
    }

    /// Sets a user's verification status.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        status: &str,
    ) -> AppResult<User> {
        ctx.require_admin()?;
        let status: VerificationStatus = status.trim().parse()?;

        let updated = self
            .users
            .set_status(user_id, status)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(admin_id = %ctx.user_id, user_id = %user_id, status = %status, "User status updated");
        Ok(updated)
    }

    /// Removes a user and, for donors, all of their donations.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<DeletedUser> {
        ctx.require_admin()?;

        let donations_removed = self
            .users
            .delete_with_donations(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            donations_removed,
            "User deleted"
        );
        Ok(DeletedUser {
            user_id,
            donations_removed,
        })
    }

    async fn load(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
