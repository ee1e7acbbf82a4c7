//! Shared fixtures for service tests: an in-memory store, a recording
//! mailer and failure-injecting fakes.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use foodbridge_auth::password::{PasswordHasher, PasswordValidator};
use foodbridge_core::config::AuthConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_core::traits::{Mailer, OutgoingMail};
use foodbridge_database::MemoryStore;
use foodbridge_database::store::{NotificationStore, UserStore};
use foodbridge_entity::donation::{CreateDonation, CreatePickupAddress, CreatePickupTimeSlot};
use foodbridge_entity::notification::Notification;
use foodbridge_entity::user::{
    OrganizationDetails, User, UserAddress, UserRole, VerificationStatus,
};
use foodbridge_service::{
    AdminUserService, DashboardService, DonationService, NotificationDispatcher,
    NotificationService, RequestContext, UserService,
};

/// Mailer that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent_to(&self, to: &str) -> Vec<OutgoingMail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        if self.fail {
            return Err(AppError::dependency("mail relay unavailable"));
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Notification store whose writes always fail.
pub struct FailingNotificationStore;

#[async_trait]
impl NotificationStore for FailingNotificationStore {
    async fn insert(&self, _notification: &Notification) -> AppResult<()> {
        Err(AppError::dependency("notification storage unavailable"))
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Notification>> {
        Ok(None)
    }

    async fn list_unread(&self, _recipient_id: Uuid) -> AppResult<Vec<Notification>> {
        Ok(Vec::new())
    }

    async fn mark_read(&self, _id: Uuid) -> AppResult<Option<Notification>> {
        Ok(None)
    }
}

/// User store that delegates to a `MemoryStore` but fails every read of
/// one user.
pub struct UnreadableUserStore {
    pub inner: MemoryStore,
    pub unreadable: Uuid,
}

#[async_trait]
impl UserStore for UnreadableUserStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        UserStore::insert(&self.inner, user).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        if id == self.unreadable {
            return Err(AppError::dependency("user storage unavailable"));
        }
        UserStore::find_by_id(&self.inner, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.inner.find_by_email(email).await
    }

    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        UserStore::list(&self.inner, role).await
    }

    async fn verified_charities_in_city(&self, city: &str) -> AppResult<Vec<User>> {
        self.inner.verified_charities_in_city(city).await
    }

    async fn update_profile(&self, user: &User) -> AppResult<Option<User>> {
        self.inner.update_profile(user).await
    }

    async fn set_status(&self, id: Uuid, status: VerificationStatus) -> AppResult<Option<User>> {
        self.inner.set_status(id, status).await
    }

    async fn delete_with_donations(&self, id: Uuid) -> AppResult<Option<u64>> {
        self.inner.delete_with_donations(id).await
    }

    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, i64)>> {
        self.inner.count_by_role().await
    }

    async fn count_pending_charities(&self) -> AppResult<i64> {
        self.inner.count_pending_charities().await
    }
}

/// Every service wired over one in-memory store.
pub struct Harness {
    pub store: MemoryStore,
    pub mailer: Arc<RecordingMailer>,
    pub donations: DonationService,
    pub users: UserService,
    pub admin: AdminUserService,
    pub notifications: NotificationService,
    pub dashboard: DashboardService,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(false, RecordingMailer::default())
    }

    pub fn with_failing_notifications() -> Self {
        Self::build(true, RecordingMailer::default())
    }

    pub fn with_failing_mailer() -> Self {
        Self::build(false, RecordingMailer::failing())
    }

    fn build(failing_notifications: bool, mailer: RecordingMailer) -> Self {
        let store = MemoryStore::new();
        let mailer = Arc::new(mailer);
        let notification_store: Arc<dyn NotificationStore> = if failing_notifications {
            Arc::new(FailingNotificationStore)
        } else {
            Arc::new(store.clone())
        };
        let notifications = NotificationService::new(notification_store);
        let dispatcher = NotificationDispatcher::new(notifications.clone(), mailer.clone());
        let users: Arc<dyn UserStore> = Arc::new(store.clone());
        let donation_store = Arc::new(store.clone());

        Self {
            donations: DonationService::new(
                users.clone(),
                donation_store.clone(),
                dispatcher.clone(),
            ),
            users: UserService::new(
                users.clone(),
                Arc::new(PasswordHasher::new()),
                Arc::new(PasswordValidator::new(&AuthConfig::default())),
                dispatcher.clone(),
            ),
            admin: AdminUserService::new(users.clone(), dispatcher),
            dashboard: DashboardService::new(users, donation_store),
            notifications,
            store,
            mailer,
        }
    }

    /// Insert a user directly and return its request context.
    pub async fn user(
        &self,
        role: UserRole,
        status: VerificationStatus,
        email: &str,
        city: Option<&str>,
    ) -> (User, RequestContext) {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: format!("{role} {email}"),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            status,
            phone: None,
            address: UserAddress {
                city: city.map(String::from),
                ..UserAddress::default()
            },
            organization: OrganizationDetails::default(),
            created_at: now,
            updated_at: now,
        };
        UserStore::insert(&self.store, &user).await.unwrap();
        let ctx = RequestContext::for_user(&user);
        (user, ctx)
    }

    pub async fn donor(&self, email: &str) -> RequestContext {
        self.user(UserRole::Donor, VerificationStatus::Verified, email, None)
            .await
            .1
    }

    pub async fn charity(&self, email: &str, city: &str, verified: bool) -> RequestContext {
        let status = if verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Pending
        };
        self.user(UserRole::Charity, status, email, Some(city))
            .await
            .1
    }

    pub async fn admin_ctx(&self) -> RequestContext {
        self.user(
            UserRole::Admin,
            VerificationStatus::Verified,
            "admin@example.com",
            None,
        )
        .await
        .1
    }

    /// A donation service whose user store fails to read `unreadable`.
    pub fn donations_unable_to_read(&self, unreadable: Uuid) -> DonationService {
        let users = Arc::new(UnreadableUserStore {
            inner: self.store.clone(),
            unreadable,
        });
        let dispatcher =
            NotificationDispatcher::new(self.notifications.clone(), self.mailer.clone());
        DonationService::new(users, Arc::new(self.store.clone()), dispatcher)
    }

    /// Unread notifications for `ctx`, read straight from the store.
    pub async fn unread(&self, ctx: &RequestContext) -> Vec<Notification> {
        self.store.list_unread(ctx.user_id).await.unwrap()
    }
}

/// A valid Cooked 5 kg donation picked up in `city`, expiring tomorrow.
pub fn donation_input(city: &str) -> CreateDonation {
    CreateDonation {
        title: Some("Vegetable curry".to_string()),
        description: Some("Two trays of curry from a catering event".to_string()),
        food_type: Some("Cooked".to_string()),
        quantity: Some(5.0),
        quantity_unit: Some("kg".to_string()),
        expiry_date: Some((Utc::now() + Duration::days(1)).to_rfc3339()),
        pickup_address: Some(CreatePickupAddress {
            street: Some("12 High St".to_string()),
            city: Some(city.to_string()),
            state: Some("IL".to_string()),
            zip_code: Some("62701".to_string()),
        }),
        pickup_time_slot: Some(CreatePickupTimeSlot {
            from: Some("17:00".to_string()),
            to: Some("19:00".to_string()),
        }),
        special_instructions: None,
        images: Vec::new(),
        status: None,
    }
}

impl Harness {
    /// Store a donation for `donor` whose expiry date passed an hour ago,
    /// still carrying `status`.
    pub async fn stale_donation(
        &self,
        donor: &RequestContext,
        status: foodbridge_entity::donation::DonationStatus,
    ) -> foodbridge_entity::donation::Donation {
        use foodbridge_database::store::DonationStore;

        let listed_at = Utc::now() - Duration::days(2);
        let mut input = donation_input("Springfield");
        input.expiry_date = Some((Utc::now() - Duration::hours(1)).to_rfc3339());
        let mut donation = foodbridge_service::donation::validation::build_donation(
            input,
            donor.user_id,
            listed_at,
        )
        .unwrap();
        donation.status = status;
        DonationStore::insert(&self.store, &donation).await.unwrap();
        donation
    }
}
