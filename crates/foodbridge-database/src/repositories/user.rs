//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use foodbridge_core::result::AppResult;
use foodbridge_entity::user::{User, UserRole, VerificationStatus};

use crate::connection::store_error;
use crate::store::UserStore;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, status, phone, \
             address_street, address_city, address_state, address_zip_code, address_country, \
             org_registration_number, org_description, org_website, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.status)
        .bind(&user.phone)
        .bind(&user.address.street)
        .bind(&user.address.city)
        .bind(&user.address.state)
        .bind(&user.address.zip_code)
        .bind(&user.address.country)
        .bind(&user.organization.registration_number)
        .bind(&user.organization.description)
        .bind(&user.organization.website)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to insert user"))?;

        debug!(user_id = %user.id, role = %user.role, "User row inserted");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, "Failed to find user by id"))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(e, "Failed to find user by email"))
    }

    async fn list(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::user_role IS NULL OR role = $1) \
             ORDER BY created_at DESC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to list users"))
    }

    async fn verified_charities_in_city(&self, city: &str) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = 'charity' AND status = 'verified' \
             AND address_city = $1",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to list charities by city"))
    }

    async fn update_profile(&self, user: &User) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = $2, phone = $3, \
             address_street = $4, address_city = $5, address_state = $6, \
             address_zip_code = $7, address_country = $8, \
             org_registration_number = $9, org_description = $10, org_website = $11, \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.address.street)
        .bind(&user.address.city)
        .bind(&user.address.state)
        .bind(&user.address.zip_code)
        .bind(&user.address.country)
        .bind(&user.organization.registration_number)
        .bind(&user.organization.description)
        .bind(&user.organization.website)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to update user profile"))
    }

    async fn set_status(&self, id: Uuid, status: VerificationStatus) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to update user status"))
    }

    async fn delete_with_donations(&self, id: Uuid) -> AppResult<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error(e, "Failed to begin transaction"))?;

        let donations = sqlx::query("DELETE FROM donations WHERE donor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error(e, "Failed to delete user donations"))?
            .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error(e, "Failed to delete user"))?
            .rows_affected();

        if users == 0 {
            tx.rollback()
                .await
                .map_err(|e| store_error(e, "Failed to roll back transaction"))?;
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| store_error(e, "Failed to commit transaction"))?;

        debug!(user_id = %id, donations, "User and owned donations deleted");
        Ok(Some(donations))
    }

    async fn count_by_role(&self) -> AppResult<Vec<(UserRole, i64)>> {
        sqlx::query_as::<_, (UserRole, i64)>("SELECT role, COUNT(*) FROM users GROUP BY role")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(e, "Failed to count users by role"))
    }

    async fn count_pending_charities(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = 'charity' AND status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error(e, "Failed to count pending charities"))
    }
}
