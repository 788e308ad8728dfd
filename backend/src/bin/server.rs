//! Attendance Dashboard HTTP Server Binary
//!
//! This is the main entry point for the dashboard REST API server.
//! It loads the configuration, creates the sheet source, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve a local JSON grid
//! SOURCE_TYPE=local cargo run --bin attendance-server
//!
//! # Read from Google Sheets
//! GOOGLE_API_KEY=... cargo run --bin attendance-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DASHBOARD_CONFIG`: Path to a `dashboard.toml` (default: searched)
//! - `SOURCE_TYPE`: `gsheets` or `local` when the config does not say
//! - `GOOGLE_ACCESS_TOKEN` / `GOOGLE_API_KEY`: Google Sheets credentials
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use attendance_dashboard::http::{create_router, AppState};
use attendance_dashboard::source::{DashboardConfig, SheetCache, SourceFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Attendance Dashboard HTTP Server");

    let config = DashboardConfig::load()?;
    let source = SourceFactory::create(&config)?;
    info!(
        "Using {} source for {} (cache ttl {}s)",
        source.kind(),
        config.locator(),
        config.cache.ttl_secs
    );

    // Create application state
    let state = AppState::new(source, SheetCache::new(config.cache_ttl()), config.locator());

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
