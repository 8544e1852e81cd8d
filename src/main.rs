//! # Primepost
//!
//! Runs the daily prime-factorization post on a cron schedule, next to a small
//! HTTP server for health checks and manual runs.
//!
//! ## Environment Variables
//!
//! - `TWITTER_API_KEY`, `TWITTER_API_SECRET`, `TWITTER_ACCESS_TOKEN`,
//!   `TWITTER_ACCESS_TOKEN_SECRET`: OAuth 1.0a credentials
//! - `TWITTER_API_BASE_URL`: API base (defaults to `https://api.twitter.com/2`)
//! - `POST_SCHEDULE`: cron expression in UTC (defaults to midnight JST)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a banner
//! - `GET /health`: Returns service health status
//! - `POST /post`: Posts today's message immediately

use log::{error, info, warn};
use primepost::{
    build_router, get_api_base_url, get_post_schedule, get_server_port,
    start_daily_post_cronjob, AppState, Credentials, Publisher,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Main entry point for the primepost service.
///
/// This function initializes the logging system, loads the credential bundle once,
/// starts the cron scheduler and serves the HTTP routes until terminated.
///
/// # Logging
///
/// The application uses the `env_logger` crate for structured logging. Log levels
/// can be controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// cargo run --bin primepost
///
/// # Post every five minutes with debug logging
/// POST_SCHEDULE="0 0/5 * * * * *" RUST_LOG=debug cargo run --bin primepost
/// ```
///
/// # Errors
///
/// Returns an error if the API base URL is invalid, the cron schedule cannot be
/// parsed, or the server port cannot be bound (e.g., port already in use).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize the logging system
    env_logger::init();

    let credentials = Arc::new(Credentials::from_env());
    if let Err(e) = credentials.validate() {
        warn!("Credentials are incomplete, scheduled posts will fail: {}", e);
    }

    let publisher = Arc::new(Publisher::new(get_api_base_url()?)?);
    info!("Publishing to {}", publisher.endpoint());

    // Start the cronjob scheduler for the daily post
    let schedule = get_post_schedule();
    let scheduler =
        start_daily_post_cronjob(Arc::clone(&publisher), Arc::clone(&credentials), &schedule)
            .await?;
    scheduler.start().await?;
    info!("Daily post cronjob started with schedule '{}'", schedule);

    // Build the HTTP application with all routes and middleware
    let app = build_router(AppState {
        publisher,
        credentials,
    })
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    // Get the server port and bind address
    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting primepost server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}
