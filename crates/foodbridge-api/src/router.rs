//! Route definitions for the FoodBridge HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router without the outer middleware layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(donation_routes())
        .merge(notification_routes())
        .merge(admin_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Registration
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/register", post(handlers::auth::register))
}

/// User self-service endpoints
fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/users/me",
        get(handlers::user::get_profile).put(handlers::user::update_profile),
    )
}

/// Donation listing and lifecycle
fn donation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/donations",
            get(handlers::donation::list_donations).post(handlers::donation::create_donation),
        )
        .route(
            "/donations/donor",
            get(handlers::donation::list_donor_donations),
        )
        .route(
            "/donations/charity",
            get(handlers::donation::list_charity_donations),
        )
        .route("/donations/{id}", get(handlers::donation::get_donation))
        .route(
            "/donations/{id}/accept",
            post(handlers::donation::accept_donation),
        )
        .route(
            "/donations/{id}/status",
            put(handlers::donation::update_donation_status),
        )
}

/// In-app notifications
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/unread",
            get(handlers::notification::list_unread),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(handlers::admin::reports::dashboard_stats))
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/verify",
            post(handlers::admin::users::verify_charity),
        )
        .route(
            "/admin/users/{id}/status",
            patch(handlers::admin::users::change_status),
        )
        .route("/admin/users/{id}", delete(handlers::admin::users::delete_user))
        .route(
            "/admin/donations",
            get(handlers::admin::donations::list_donations),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
