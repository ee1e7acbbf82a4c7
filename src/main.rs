//! FoodBridge Server: surplus food donation platform.
//!
//! Main entry point that loads configuration, initializes logging and
//! dispatches the selected command.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use foodbridge_api::{AppState, Stores};
use foodbridge_core::config::{AppConfig, DatabaseBackend};
use foodbridge_core::error::AppError;
use foodbridge_service::notification::build_mailer;

/// FoodBridge server and maintenance commands.
#[derive(Debug, Parser)]
#[command(name = "foodbridge", version, about, long_about = None)]
struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = "config", env = "FOODBRIDGE_CONFIG_DIR")]
    config: String,

    /// Environment overlay to apply (`{config}/{env}.toml`)
    #[arg(short, long, default_value = "development", env = "FOODBRIDGE_ENV")]
    env: String,

    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    command: Option<Command>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Override the server port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the server host
        #[arg(long)]
        host: Option<String>,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Create an admin account unless the email is already registered
    CreateAdmin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli.command, config).await {
        tracing::error!(error = %e.detail_chain(), "FoodBridge exited with an error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(command: Option<Command>, mut config: AppConfig) -> Result<(), AppError> {
    match command.unwrap_or(Command::Serve {
        port: None,
        host: None,
    }) {
        Command::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting FoodBridge");
            foodbridge_api::run_server(config).await
        }
        Command::Migrate => {
            if config.database.backend != DatabaseBackend::Postgres {
                return Err(AppError::configuration(
                    "Migrations only apply to the postgres backend",
                ));
            }
            config.database.run_migrations = true;
            let stores = Stores::open(&config.database).await?;
            if let Some(pool) = stores.pool {
                pool.close().await;
            }
            tracing::info!("All migrations applied");
            Ok(())
        }
        Command::CreateAdmin {
            name,
            email,
            password,
        } => {
            if config.database.backend == DatabaseBackend::Memory {
                return Err(AppError::configuration(
                    "create-admin needs a persistent backend",
                ));
            }
            let stores = Stores::open(&config.database).await?;
            let mailer = build_mailer(&config.mail)?;
            let state = AppState::new(config, stores, mailer);
            match state.user_service.seed_admin(&name, &email, &password).await? {
                Some(admin) => tracing::info!(user_id = %admin.id, "Admin account created"),
                None => tracing::info!(email = %email, "Email already registered; nothing to do"),
            }
            if let Some(pool) = &state.db_pool {
                pool.close().await;
            }
            Ok(())
        }
    }
}
