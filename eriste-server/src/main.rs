//! Eriste Storefront Server
//!
//! The HTTP API behind the eriste storefront: public catalog, carts,
//! checkout, seller onboarding, the payment-gateway callback endpoint,
//! and the admin panel API.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, get_database_url};
use eriste_core::processors::OrderExpiryWatcher;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Eriste storefront - noodle shop API server
#[derive(Parser, Debug)]
#[command(name = "eriste-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./eriste-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run database migrations on startup
    #[arg(long, default_value = "false")]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing first, so config failures are visible
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting eriste-server v{}", env!("CARGO_PKG_VERSION"));

    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader
        .load()
        .inspect_err(|e| tracing::error!(error = %e, "Could not load configuration"))?;

    let listen_addr = loaded_config.server.listen;
    tracing::info!(path = ?args.config, "Configuration loaded");
    if loaded_config.gateway.is_none() {
        tracing::warn!(
            "Payment gateway credentials not set; callback endpoint will answer 500 until they are"
        );
    }

    let shared_config = loaded_config.into_shared();

    let database_url = get_database_url()
        .inspect_err(|_| tracing::error!("DATABASE_URL environment variable not set"))?;

    tracing::info!("Connecting to Postgres");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Database connection failed"))?;
    tracing::info!("Database pool ready");

    if args.migrate {
        tracing::info!("Applying database migrations");
        sqlx::migrate!("../migrations")
            .run(&db_pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Migration run failed"))?;
        tracing::info!("Migrations up to date");
    }

    let state = AppState::new(db_pool.clone(), shared_config.clone());

    // Background sweep flipping stale pending orders to expired
    let (expiry_shutdown_tx, expiry_shutdown_rx) = tokio::sync::watch::channel(false);
    let expiry_watcher = OrderExpiryWatcher::new(
        db_pool.clone(),
        shared_config.store.clone(),
        expiry_shutdown_rx,
    );
    let expiry_handle = tokio::spawn(expiry_watcher.run());

    // SIGHUP reload task
    let reload_stop = spawn_config_reload_handler(state.clone(), config_loader);

    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Stop the background tasks before draining the pool
    reload_stop.notify_one();
    let _ = expiry_shutdown_tx.send(true);
    if let Err(e) = expiry_handle.await {
        tracing::error!(error = %e, "Order expiry watcher task panicked");
    }

    tracing::info!("Draining database pool");
    db_pool.close().await;
    tracing::info!("Shutdown complete");

    result.map_err(Into::into)
}

/// Env-filtered fmt subscriber; `RUST_LOG` overrides the default.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
