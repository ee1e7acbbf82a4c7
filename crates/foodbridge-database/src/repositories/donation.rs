//! Donation repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use foodbridge_core::result::AppResult;
use foodbridge_entity::donation::{Donation, DonationStatus, FoodType};

use crate::connection::store_error;
use crate::store::{DonationFilter, DonationStore, MonthlyCount};

/// Repository for donation CRUD, compare-and-set and aggregate queries.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    /// Create a new donation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for DonationRepository {
    async fn insert(&self, donation: &Donation) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO donations (id, title, description, donor_id, accepted_by, accepted_at, \
             status, food_type, quantity, quantity_unit, expiry_date, \
             pickup_street, pickup_city, pickup_state, pickup_zip_code, pickup_from, pickup_to, \
             special_instructions, images, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21)",
        )
        .bind(donation.id)
        .bind(&donation.title)
        .bind(&donation.description)
        .bind(donation.donor_id)
        .bind(donation.accepted_by)
        .bind(donation.accepted_at)
        .bind(donation.status)
        .bind(donation.food_type)
        .bind(donation.quantity)
        .bind(donation.quantity_unit)
        .bind(donation.expiry_date)
        .bind(&donation.pickup_address.street)
        .bind(&donation.pickup_address.city)
        .bind(&donation.pickup_address.state)
        .bind(&donation.pickup_address.zip_code)
        .bind(&donation.pickup_time_slot.from)
        .bind(&donation.pickup_time_slot.to)
        .bind(&donation.special_instructions)
        .bind(&donation.images)
        .bind(donation.created_at)
        .bind(donation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to insert donation"))?;

        debug!(donation_id = %donation.id, donor_id = %donation.donor_id, "Donation row inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>> {
        sqlx::query_as::<_, Donation>("SELECT * FROM donations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, "Failed to find donation by id"))
    }

    async fn list(&self, filter: &DonationFilter) -> AppResult<Vec<Donation>> {
        sqlx::query_as::<_, Donation>(
            "SELECT * FROM donations WHERE \
             ($1::donation_status IS NULL OR \
             (CASE WHEN expiry_date < $5 THEN 'expired'::donation_status ELSE status END) = $1) \
             AND ($2::text IS NULL OR pickup_city = $2) \
             AND ($3::uuid IS NULL OR donor_id = $3) \
             AND ($4::uuid IS NULL OR accepted_by = $4) \
             ORDER BY created_at DESC",
        )
        .bind(filter.status)
        .bind(filter.city.as_deref())
        .bind(filter.donor_id)
        .bind(filter.accepted_by)
        .bind(filter.as_of)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to list donations"))
    }

    async fn accept(
        &self,
        id: Uuid,
        charity_id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Donation>> {
        let accepted = sqlx::query_as::<_, Donation>(
            "UPDATE donations SET status = 'accepted', accepted_by = $2, accepted_at = $3, \
             updated_at = $3 \
             WHERE id = $1 AND status = 'available' AND expiry_date >= $3 RETURNING *",
        )
        .bind(id)
        .bind(charity_id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to accept donation"))?;

        debug!(donation_id = %id, won = accepted.is_some(), "Accept compare-and-set");
        Ok(accepted)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: DonationStatus,
        new: DonationStatus,
    ) -> AppResult<Option<Donation>> {
        let updated = sqlx::query_as::<_, Donation>(
            "UPDATE donations SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(new)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to update donation status"))?;

        debug!(
            donation_id = %id,
            expected = %expected,
            new = %new,
            won = updated.is_some(),
            "Status compare-and-set"
        );
        Ok(updated)
    }

    async fn count_by_status(
        &self,
        as_of: DateTime<Utc>,
    ) -> AppResult<Vec<(DonationStatus, i64)>> {
        sqlx::query_as::<_, (DonationStatus, i64)>(
            "SELECT CASE WHEN expiry_date < $1 THEN 'expired'::donation_status ELSE status END \
             AS effective, COUNT(*) FROM donations GROUP BY effective",
        )
        .bind(as_of)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to count donations by status"))
    }

    async fn count_by_food_type(&self) -> AppResult<Vec<(FoodType, i64)>> {
        sqlx::query_as::<_, (FoodType, i64)>(
            "SELECT food_type, COUNT(*) FROM donations GROUP BY food_type",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to count donations by food type"))
    }

    async fn count_by_month_since(&self, since: DateTime<Utc>) -> AppResult<Vec<MonthlyCount>> {
        let rows = sqlx::query_as::<_, (i32, i32, i64)>(
            "SELECT EXTRACT(YEAR FROM created_at AT TIME ZONE 'UTC')::INT AS year, \
             EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::INT AS month, COUNT(*) \
             FROM donations WHERE created_at >= $1 GROUP BY year, month",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to count donations by month"))?;

        Ok(rows
            .into_iter()
            .map(|(year, month, count)| MonthlyCount {
                year,
                month: month.unsigned_abs(),
                count,
            })
            .collect())
    }
}
