//! Registration and profile self-service.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

use foodbridge_auth::password::{PasswordHasher, PasswordValidator};
use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_core::Outcome;
use foodbridge_database::store::UserStore;
use foodbridge_entity::user::{
    OrganizationDetails, UpdateProfile, User, UserAddress, UserRole, VerificationStatus,
};

use crate::context::RequestContext;
use crate::notification::{NotificationDispatcher, templates};

/// Handles registration and profile self-service.
#[derive(Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Mail delivery for the registration notice.
    dispatcher: NotificationDispatcher,
}

/// Registration input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `donor` or `charity`; admins are created from the command line.
    pub role: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub address: UserAddress,
    #[serde(default, alias = "organizationDetails")]
    pub organization: OrganizationDetails,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            dispatcher,
        }
    }

    /// Registers a donor or charity.
    ///
    /// Charities start `pending` and receive a "registration under review"
    /// mail; a failed send is returned as a warning.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<Outcome<User>> {
        let name = trimmed(req.name).ok_or_else(|| AppError::missing_field("name"))?;
        let email = trimmed(req.email)
            .map(|e| normalize_email(&e))
            .ok_or_else(|| AppError::missing_field("email"))?;
        if !email.validate_email() {
            return Err(AppError::invalid_field("email", "Invalid email address"));
        }
        let password = req
            .password
            .ok_or_else(|| AppError::missing_field("password"))?;
        self.validator.validate(&password)?;
        let role: UserRole = trimmed(req.role)
            .ok_or_else(|| AppError::missing_field("role"))?
            .parse()?;
        if role.is_admin() {
            return Err(AppError::invalid_field(
                "role",
                "Admin accounts cannot be self-registered",
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = self
            .insert_user(NewAccount {
                name,
                email,
                password: &password,
                role,
                phone: trimmed(req.phone),
                address: req.address,
                organization: req.organization,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, status = %user.status, "User registered");

        let mut warnings = Vec::new();
        if user.role.requires_verification() {
            self.dispatcher
                .mail(
                    "registration_under_review",
                    templates::registration_under_review_mail(&user),
                    &mut warnings,
                )
                .await;
        }

        Ok(Outcome::with_warnings(user, warnings))
    }

    /// Creates an admin account unless one with `email` already exists.
    ///
    /// Returns `None` when the email is already registered.
    pub async fn seed_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            info!(email = %email, "Admin seed skipped; email already registered");
            return Ok(None);
        }
        self.validator.validate(password)?;

        let user = self
            .insert_user(NewAccount {
                name: name.trim().to_string(),
                email,
                password,
                role: UserRole::Admin,
                phone: None,
                address: UserAddress::default(),
                organization: OrganizationDetails::default(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Admin account created");
        Ok(Some(user))
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    ///
    /// Address parts are merged one by one; omitted parts keep their value.
    pub async fn update_profile(&self, ctx: &RequestContext, req: UpdateProfile) -> AppResult<User> {
        let mut user = self.get_profile(ctx).await?;

        if let Some(name) = req.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::invalid_field("name", "Name cannot be empty"));
            }
            user.name = name.to_string();
        }
        if let Some(phone) = trimmed(req.phone) {
            user.phone = Some(phone);
        }
        if let Some(address) = req.address {
            user.address.merge(address);
        }
        if let Some(organization) = req.organization {
            user.organization = organization;
        }

        let updated = self
            .users
            .update_profile(&user)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(updated)
    }

    async fn insert_user(&self, account: NewAccount<'_>) -> AppResult<User> {
        let password_hash = self.hasher.hash(account.password)?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash,
            role: account.role,
            status: VerificationStatus::initial_for(account.role),
            phone: account.phone,
            address: account.address,
            organization: account.organization,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await?;
        Ok(user)
    }
}

struct NewAccount<'a> {
    name: String,
    email: String,
    password: &'a str,
    role: UserRole,
    phone: Option<String>,
    address: UserAddress,
    organization: OrganizationDetails,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Emails are stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
