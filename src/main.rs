//! Postboard Server: token-authenticated posts API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, fmt};

use postboard_api::AppState;
use postboard_core::config::AppConfig;
use postboard_core::error::AppError;
use postboard_database::connection::DatabasePool;
use postboard_database::migration::run_migrations;
use postboard_database::{MemoryStore, Stores};
use postboard_worker::{LogNotifier, TaskSupervisor};

/// Command-line overrides applied on top of the layered configuration.
#[derive(Debug, Parser)]
#[command(name = "postboard-server", version, about = "Postboard API server")]
struct Cli {
    /// Environment name; selects `config/{env}.toml`
    #[arg(long, env = "POSTBOARD_ENV", default_value = "development")]
    env: String,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL DSN
    #[arg(long = "db-dsn", env = "DB_URI")]
    db_dsn: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then apply CLI overrides
fn load_configuration(cli: &Cli) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&cli.env)?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(dsn) = &cli.db_dsn {
        config.database.url = dsn.clone();
    }

    Ok(config)
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

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        env = %config.server.env,
        "Starting Postboard v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Persistence ──────────────────────────────────────
    let pool = if config.database.url.is_empty() {
        tracing::warn!("No database configured, using the in-memory store");
        None
    } else {
        let pool = DatabasePool::connect(&config.database).await?;
        run_migrations(pool.pool()).await?;
        Some(pool)
    };
    let stores = match &pool {
        Some(pool) => pool.stores(),
        None => Stores::memory(MemoryStore::new()),
    };

    // ── Step 2: Gates, services, supervisor ──────────────────────
    let supervisor = TaskSupervisor::new();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, stores, supervisor.clone(), Arc::new(LogNotifier));

    // ── Step 3: Rate limiter sweeper ─────────────────────────────
    let (sweeper_tx, sweeper_rx) = watch::channel(false);
    let sweeper = tokio::spawn(state.rate_limiter.clone().run_sweeper(sweeper_rx));

    // ── Step 4: Bind and serve ───────────────────────────────────
    let app = postboard_api::build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Postboard server listening on {}", addr);

    let served = postboard_api::serve(listener, app, supervisor, grace, shutdown_signal()).await;

    // ── Step 5: Tear down ────────────────────────────────────────
    stop_background("rate_limit_sweeper", sweeper_tx, sweeper).await;
    if let Some(pool) = pool {
        pool.close().await;
    }

    served?;
    tracing::info!("Postboard server shut down gracefully");
    Ok(())
}

/// Signal a background loop to stop and wait for it.
///
/// Returns `false` when the loop panicked or was cancelled.
async fn stop_background(name: &str, stop: watch::Sender<bool>, handle: JoinHandle<()>) -> bool {
    let _ = stop.send(true);
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(task = name, "Background loop failed: {}", e);
            false
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
