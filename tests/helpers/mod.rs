//! Shared test helpers for HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use foodbridge_api::{AppState, Stores, build_app};
use foodbridge_auth::jwt::Claims;
use foodbridge_core::config::{AppConfig, DatabaseBackend};
use foodbridge_database::store::UserStore;
use foodbridge_entity::user::{
    OrganizationDetails, User, UserAddress, UserRole, VerificationStatus,
};
use foodbridge_service::notification::LogMailer;

const SECRET: &str = "http-test-secret";

/// Test application over in-memory stores.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The stores behind the router, for direct setup and checks
    pub stores: Stores,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.auth.jwt_secret = SECRET.to_string();

        let stores = Stores::memory();
        let mailer = Arc::new(LogMailer::new(config.mail.from.clone()));
        let state = AppState::new(config, stores.clone(), mailer);

        Self {
            router: build_app(state),
            stores,
        }
    }

    /// Insert a user directly and return it with a valid bearer token.
    pub async fn create_user(
        &self,
        role: UserRole,
        status: VerificationStatus,
        email: &str,
        city: Option<&str>,
    ) -> (User, String) {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: email.to_string(),
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
        self.stores
            .users
            .insert(&user)
            .await
            .expect("Failed to create test user");
        let token = token_for(user.id, role);
        (user, token)
    }

    pub async fn donor(&self, email: &str) -> (User, String) {
        self.create_user(UserRole::Donor, VerificationStatus::Verified, email, None)
            .await
    }

    pub async fn charity(&self, email: &str, verified: bool) -> (User, String) {
        let status = if verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Pending
        };
        self.create_user(UserRole::Charity, status, email, Some("Springfield"))
            .await
    }

    pub async fn admin(&self) -> (User, String) {
        self.create_user(
            UserRole::Admin,
            VerificationStatus::Verified,
            "admin@foodbridge.org",
            None,
        )
        .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str, token).await
    }

    /// Make an HTTP request with a body sent as-is
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body_str: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Mint a token the way the account service does.
pub fn token_for(user_id: Uuid, role: UserRole) -> String {
    sign(&Claims::new(user_id, role, Utc::now() + Duration::hours(1)), SECRET)
}

pub fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// A valid donation body picked up in Springfield.
pub fn donation_body() -> Value {
    serde_json::json!({
        "title": "Bread rolls",
        "description": "Three crates of day-old bread rolls",
        "foodType": "Packaged",
        "quantity": 3,
        "quantityUnit": "packages",
        "expiryDate": (Utc::now() + Duration::days(2)).to_rfc3339(),
        "pickupAddress": {
            "street": "4 Market St",
            "city": "Springfield",
            "state": "IL",
            "zipCode": "62701"
        },
        "pickupTimeSlot": { "from": "09:00", "to": "11:00" }
    })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
