//! Admin dashboard statistics.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use foodbridge_core::result::AppResult;
use foodbridge_database::store::{DonationStore, UserStore};
use foodbridge_entity::donation::{DonationStatus, FoodType};
use foodbridge_entity::user::UserRole;

use crate::context::RequestContext;

/// Number of months in the trailing donation series.
pub const TRAILING_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Computes dashboard statistics fresh on every call.
#[derive(Clone)]
pub struct DashboardService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Donation store.
    donations: Arc<dyn DonationStore>,
}

/// Dashboard statistics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_donors: i64,
    pub total_charities: i64,
    pub total_admins: i64,
    /// Charities awaiting verification.
    pub pending_verifications: i64,
    pub total_donations: i64,
    /// Count per effective status; every status is present.
    pub donations_by_status: BTreeMap<String, i64>,
    /// Oldest month first; months without donations are zero.
    pub monthly_donations: Vec<MonthBucket>,
    /// Count per food type; every food type is present.
    pub donations_by_food_type: BTreeMap<String, i64>,
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
}

/// Donations created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// Short month name, e.g. `"Mar"`.
    pub label: String,
    pub count: i64,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(users: Arc<dyn UserStore>, donations: Arc<dyn DonationStore>) -> Self {
        Self { users, donations }
    }

    /// Builds the dashboard for an admin.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<DashboardStats> {
        ctx.require_admin()?;
        self.stats_at(Utc::now()).await
    }

    /// Builds the dashboard as observed at `now`.
    pub async fn stats_at(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        let mut by_role: HashMap<UserRole, i64> = HashMap::new();
        for (role, n) in self.users.count_by_role().await? {
            *by_role.entry(role).or_default() += n;
        }
        let role_count = |role: UserRole| by_role.get(&role).copied().unwrap_or(0);
        let pending_verifications = self.users.count_pending_charities().await?;

        let mut donations_by_status: BTreeMap<String, i64> = DonationStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for (status, n) in self.donations.count_by_status(now).await? {
            *donations_by_status.entry(status.as_str().to_string()).or_default() += n;
        }
        let total_donations = donations_by_status.values().sum();

        let mut donations_by_food_type: BTreeMap<String, i64> = FoodType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        for (food_type, n) in self.donations.count_by_food_type().await? {
            *donations_by_food_type
                .entry(food_type.as_str().to_string())
                .or_default() += n;
        }

        let window = trailing_months(now, TRAILING_MONTHS);
        let since = window
            .first()
            .and_then(|&(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
            .unwrap_or(now);
        let counts = self.donations.count_by_month_since(since).await?;
        let monthly_donations = window
            .into_iter()
            .map(|(year, month)| MonthBucket {
                year,
                month,
                label: month_label(month).to_string(),
                count: counts
                    .iter()
                    .filter(|c| c.year == year && c.month == month)
                    .map(|c| c.count)
                    .sum(),
            })
            .collect();

        let stats = DashboardStats {
            total_users: by_role.values().sum(),
            total_donors: role_count(UserRole::Donor),
            total_charities: role_count(UserRole::Charity),
            total_admins: role_count(UserRole::Admin),
            pending_verifications,
            total_donations,
            donations_by_status,
            monthly_donations,
            donations_by_food_type,
            generated_at: now,
        };

        debug!(
            total_users = stats.total_users,
            total_donations = stats.total_donations,
            "Dashboard stats computed"
        );
        Ok(stats)
    }
}

/// The `count` calendar months ending with the month of `now`, oldest first.
fn trailing_months(now: DateTime<Utc>, count: u32) -> Vec<(i32, u32)> {
    let current = now.year() * 12 + now.month0() as i32;
    (0..count as i32)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

fn month_label(month: u32) -> &'static str {
    MONTH_LABELS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trailing_months_crosses_year() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
        assert_eq!(
            trailing_months(now, 6),
            vec![(2025, 9), (2025, 10), (2025, 11), (2025, 12), (2026, 1), (2026, 2)]
        );
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
    }
}
