//! # foodbridge-api
//!
//! HTTP API layer for FoodBridge built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging, admin
//! guard), the bearer-token extractor, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Stores, build_app, run_server};
pub use state::AppState;
