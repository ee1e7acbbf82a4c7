//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foodbridge_auth::jwt::JwtDecoder;
use foodbridge_auth::password::{PasswordHasher, PasswordValidator};
use foodbridge_core::config::AppConfig;
use foodbridge_core::traits::Mailer;
use foodbridge_database::DatabasePool;
use foodbridge_database::store::UserStore;
use foodbridge_service::{
    AdminUserService, DashboardService, DonationService, NotificationDispatcher,
    NotificationService, UserService,
};

use crate::app::Stores;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool; `None` on the in-memory backend
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Identity store, re-read on every authenticated request
    pub users: Arc<dyn UserStore>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and profile service
    pub user_service: Arc<UserService>,
    /// Admin account management
    pub admin_user_service: Arc<AdminUserService>,
    /// Donation lifecycle engine
    pub donation_service: Arc<DonationService>,
    /// In-app notifications
    pub notification_service: Arc<NotificationService>,
    /// Dashboard statistics
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Wire every service over `stores`, sending mail through `mailer`.
    pub fn new(config: AppConfig, stores: Stores, mailer: Arc<dyn Mailer>) -> Self {
        let notification_service = NotificationService::new(Arc::clone(&stores.notifications));
        let dispatcher = NotificationDispatcher::new(notification_service.clone(), mailer);

        let user_service = UserService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            dispatcher.clone(),
        );
        let admin_user_service =
            AdminUserService::new(Arc::clone(&stores.users), dispatcher.clone());
        let donation_service = DonationService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.donations),
            dispatcher,
        );
        let dashboard_service =
            DashboardService::new(Arc::clone(&stores.users), Arc::clone(&stores.donations));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            db_pool: stores.pool,
            users: stores.users,
            user_service: Arc::new(user_service),
            admin_user_service: Arc::new(admin_user_service),
            donation_service: Arc::new(donation_service),
            notification_service: Arc::new(notification_service),
            dashboard_service: Arc::new(dashboard_service),
        }
    }
}
