//! In-memory store backed by `DashMap`, used for tests and local runs.
//!
//! One [`MemoryStore`] implements all three store traits so that user
//! deletion can remove the user's donations under the same lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_entity::donation::{Donation, DonationStatus, FoodType};
use foodbridge_entity::notification::Notification;
use foodbridge_entity::user::{User, UserRole, VerificationStatus};

use crate::store::{DonationFilter, DonationStore, MonthlyCount, NotificationStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: DashMap<Uuid, User>,
    donations: DashMap<Uuid, Donation>,
    notifications: DashMap<Uuid, Notification>,
    /// Held for writing while a user is inserted or removed together with
    /// their donations.
    structure: RwLock<()>,
}

/// Shared in-memory tables. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> DateTime<Utc>) {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> AppResult<()> {
        // Exclusive so the email check and the insert can't interleave with
        // another registration.
        let _guard = self.tables.structure.write().await;
        let taken = self
            .tables
            .users
            .iter()
            .any(|entry| entry.email == user.email);
        if taken {
            return Err(AppError::conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        self.tables.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "User inserted into memory store");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.clone()))
    }

    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .tables
            .users
            .iter()
            .filter(|entry| role.is_none_or(|r| entry.role == r))
            .map(|entry| entry.clone())
            .collect();
        newest_first(&mut users, |u| u.created_at);
        Ok(users)
    }

    async fn verified_charities_in_city(&self, city: &str) -> AppResult<Vec<User>> {
        Ok(self
            .tables
            .users
            .iter()
            .filter(|entry| {
                entry.is_verified_charity() && entry.address.city.as_deref() == Some(city)
            })
            .map(|entry| entry.clone())
            .collect())
    }

    async fn update_profile(&self, user: &User) -> AppResult<Option<User>> {
        Ok(self.tables.users.get_mut(&user.id).map(|mut entry| {
            entry.name = user.name.clone();
            entry.phone = user.phone.clone();
            entry.address = user.address.clone();
            entry.organization = user.organization.clone();
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn set_status(&self, id: Uuid, status: VerificationStatus) -> AppResult<Option<User>> {
        Ok(self.tables.users.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }

    async fn delete_with_donations(&self, id: Uuid) -> AppResult<Option<u64>> {
        let _guard = self.tables.structure.write().await;
        if self.tables.users.remove(&id).is_none() {
            return Ok(None);
        }

        let before = self.tables.donations.len();
        self.tables.donations.retain(|_, d| d.donor_id != id);
        let removed = (before - self.tables.donations.len()) as u64;

        self.tables.notifications.retain(|_, n| n.recipient_id != id);
        for mut donation in self.tables.donations.iter_mut() {
            if donation.accepted_by == Some(id) {
                donation.accepted_by = None;
            }
        }

        debug!(user_id = %id, removed, "User removed from memory store");
        Ok(Some(removed))
    }

    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, i64)>> {
        let mut counts: HashMap<UserRole, i64> = HashMap::new();
        for entry in self.tables.users.iter() {
            *counts.entry(entry.role).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_pending_charities(&self) -> AppResult<i64> {
        Ok(self
            .tables
            .users
            .iter()
            .filter(|e| e.role == UserRole::Charity && e.status == VerificationStatus::Pending)
            .count() as i64)
    }
}

#[async_trait]
impl DonationStore for MemoryStore {
    async fn insert(&self, donation: &Donation) -> AppResult<()> {
        let _guard = self.tables.structure.read().await;
        if !self.tables.users.contains_key(&donation.donor_id) {
            return Err(AppError::dependency(format!(
                "Donor {} does not exist",
                donation.donor_id
            )));
        }
        self.tables.donations.insert(donation.id, donation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>> {
        Ok(self.tables.donations.get(&id).map(|d| d.clone()))
    }

    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>> {
        let mut donations: Vec<Donation> = self
            .tables
            .donations
            .iter()
            .filter(|entry| filter.matches(entry))
            .map(|entry| entry.clone())
            .collect();
        newest_first(&mut donations, |d| d.created_at);
        Ok(donations)
    }

    async fn accept(
        &self,
        id: Uuid,
        charity_id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Donation>> {
        // The entry guard holds the shard lock for the whole check-and-set.
        let Some(mut entry) = self.tables.donations.get_mut(&id) else {
            return Ok(None);
        };
        if entry.status != DonationStatus::Available || entry.is_expired_at(at) {
            return Ok(None);
        }
        entry.status = DonationStatus::Accepted;
        entry.accepted_by = Some(charity_id);
        entry.accepted_at = Some(at);
        entry.updated_at = at;
        Ok(Some(entry.clone()))
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new: DonationStatus,
    ) -> AppResult<Option<Donation>> {
        let Some(mut entry) = self.tables.donations.get_mut(&id) else {
            return Ok(None);
        };
        if entry.status != expected {
            return Ok(None);
        }
        entry.status = new;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn count_by_status(
        &self,
        as_of: DateTime<Utc>,
    ) -> AppResult<Vec<(DonationStatus, i64)>> {
        let mut counts: HashMap<DonationStatus, i64> = HashMap::new();
        for entry in self.tables.donations.iter() {
            *counts.entry(entry.effective_status(as_of)).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_food_type(&self) -> AppResult<Vec<(FoodType, i64)>> {
        let mut counts: HashMap<FoodType, i64> = HashMap::new();
        for entry in self.tables.donations.iter() {
            *counts.entry(entry.food_type).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn count_by_month_since(&self, since: DateTime<Utc>) -> AppResult<Vec<MonthlyCount>> {
        let mut counts: HashMap<(i32, u32), i64> = HashMap::new();
        for entry in self.tables.donations.iter() {
            if entry.created_at >= since {
                let key = (entry.created_at.year(), entry.created_at.month());
                *counts.entry(key).or_default() += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        let _guard = self.tables.structure.read().await;
        if !self.tables.users.contains_key(&notification.recipient_id) {
            return Err(AppError::dependency(format!(
                "Notification recipient {} not found",
                notification.recipient_id
            )));
        }
        self.tables
            .notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.tables.notifications.get(&id).map(|n| n.clone()))
    }

    async fn list_unread(&self, recipient_id: Uuid) -> AppResult<Vec<Notification>> {
        let mut unread: Vec<Notification> = self
            .tables
            .notifications
            .iter()
            .filter(|entry| entry.recipient_id == recipient_id && !entry.is_read)
            .map(|entry| entry.clone())
            .collect();
        newest_first(&mut unread, |n| n.created_at);
        Ok(unread)
    }

    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self.tables.notifications.get_mut(&id).map(|mut entry| {
            entry.is_read = true;
            entry.clone()
        }))
    }
}
