//! Persistence seams used by the service layer.
//!
//! Every status change goes through a compare-and-set method so that two
//! concurrent writers cannot both succeed from the same observed state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use foodbridge_core::AppResult;
use foodbridge_entity::donation::{Donation, DonationStatus, FoodType};
use foodbridge_entity::notification::Notification;
use foodbridge_entity::user::{User, UserRole, VerificationStatus};

/// User records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List users, newest first, optionally restricted to one role.
    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>>;

    /// Verified charities whose registered city equals `city` exactly.
    async fn verified_charities_in_city(&self, city: &str) -> AppResult<Vec<User>>;

    /// Persist profile fields (name, phone, address, organization).
    async fn update_profile(&self, user: &User) -> AppResult<Option<User>>;

    /// Set the verification status.
    async fn set_status(&self, id: Uuid, status: VerificationStatus) -> AppResult<Option<User>>;

    /// Delete a user together with every donation they own, atomically.
    ///
    /// Returns the number of donations removed, or `None` when the user does
    /// not exist.
    async fn delete_with_donations(&self, id: Uuid) -> AppResult<Option<u64>>;

    /// Number of users per role.
    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, i64)>>;

    /// Number of charities awaiting verification.
    async fn count_pending_charities(&self) -> AppResult<i64>;
}

/// Query parameters for donation listings.
///
/// `status` matches the effective status as of `as_of`.
#[derive(Debug, Clone)]
pub struct DonationFilter {
    pub status: Option<DonationStatus>,
    pub city: Option<String>,
    pub donor_id: Option<Uuid>,
    pub accepted_by: Option<Uuid>,
    pub as_of: DateTime<Utc>,
}

impl DonationFilter {
    /// A filter that matches everything.
    pub fn all(as_of: DateTime<Utc>) -> Self {
        Self {
            status: None,
            city: None,
            donor_id: None,
            accepted_by: None,
            as_of,
        }
    }

    /// Whether `donation` passes this filter.
    pub fn matches(&self, donation: &Donation) -> bool {
        self.status
            .is_none_or(|s| donation.effective_status(self.as_of) == s)
            && self
                .city
                .as_deref()
                .is_none_or(|c| donation.pickup_address.city == c)
            && self.donor_id.is_none_or(|id| donation.donor_id == id)
            && self
                .accepted_by
                .is_none_or(|id| donation.accepted_by == Some(id))
    }
}

/// Donations created in one calendar month (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// Donation records.
#[async_trait]
pub trait DonationStore: Send + Sync + 'static {
    /// Insert a new donation.
    async fn insert(&self, donation: &Donation) -> AppResult<()>;

    /// Find a donation by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>>;

    /// List donations matching `filter`, newest first.
    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>>;

    /// Atomically move `available` to `accepted`, stamping the acceptor.
    ///
    /// Only succeeds while the donation is still unexpired at `at`. Returns
    /// `None` when the record is missing or no longer matches.
    async fn accept(&self, id: Uuid, charity_id: Uuid, at: DateTime<Utc>)
        -> AppResult<Option<Donation>>;

    /// Atomically set the status when the stored status equals `expected`.
    ///
    /// Returns `None` when the record is missing or its status has changed.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new: DonationStatus,
    ) -> AppResult<Option<Donation>>;

    /// Number of donations per effective status as of `as_of`.
    async fn count_by_status(&self, as_of: DateTime<Utc>) -> AppResult<Vec<(DonationStatus, i64)>>;

    /// Number of donations per food type.
    async fn count_by_food_type(&self) -> AppResult<Vec<(FoodType, i64)>>;

    /// Donations created at or after `since`, grouped by UTC calendar month.
    async fn count_by_month_since(&self, since: DateTime<Utc>) -> AppResult<Vec<MonthlyCount>>;
}

/// In-app notification records.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Insert a notification. Fails with `Dependency` when the recipient
    /// does not exist.
    async fn insert(&self, notification: &Notification) -> AppResult<()>;

    /// Find a notification by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Unread notifications for `recipient_id`, newest first.
    async fn list_unread(&self, recipient_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Set the read flag. Returns `None` when the notification does not exist.
    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>>;
}
