//! Application builder: wires stores, services, router and middleware
//! into an Axum app and serves it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use foodbridge_core::config::{AppConfig, DatabaseBackend, DatabaseConfig};
use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_database::store::{DonationStore, NotificationStore, UserStore};
use foodbridge_database::{
    DatabasePool, DonationRepository, MemoryStore, NotificationRepository, UserRepository,
};
use foodbridge_service::notification::build_mailer;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// The three stores the services run over.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub donations: Arc<dyn DonationStore>,
    pub notifications: Arc<dyn NotificationStore>,
    /// Present on the PostgreSQL backend, for health checks.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Process-local stores; data is lost on restart.
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            donations: Arc::new(store.clone()),
            notifications: Arc::new(store),
            pool: None,
        }
    }

    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            donations: Arc::new(DonationRepository::new(pg.clone())),
            notifications: Arc::new(NotificationRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Open the configured backend, running migrations when enabled.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                tracing::warn!("Using in-memory stores; data will not survive a restart");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    foodbridge_database::migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
        }
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = build_cors_layer(&server.cors);
    let body_limit = DefaultBodyLimit::max(server.max_body_bytes);

    build_router(state)
        .layer(body_limit)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(build_compression_layer())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
}

/// Runs the FoodBridge server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    tracing::info!("Starting FoodBridge server...");

    let stores = Stores::open(&config.database).await?;
    let mailer = build_mailer(&config.mail)?;
    let pool = stores.pool.clone();
    let addr = config.server.bind_address();

    let app = build_app(AppState::new(config, stores, mailer));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "FoodBridge server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("FoodBridge server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
