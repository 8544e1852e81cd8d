//! HTTP route handlers for the primepost service.
//!
//! This module contains the HTTP route handler functions and the router they are
//! mounted on.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{error, info};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::Credentials;
use crate::cronjob::run_daily_post;
use crate::error::PublishError;
use crate::twitter::Publisher;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Publisher used by the manual trigger
    pub publisher: Arc<Publisher>,
    /// Credential bundle loaded at startup
    pub credentials: Arc<Credentials>,
}

/// Builds the application router with all routes.
///
/// - `GET /`: Service banner
/// - `GET /health`: Health check
/// - `POST /post`: Runs the daily post immediately
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/post", post(handle_post))
        .with_state(state)
}

/// Handles GET requests to the root `/` endpoint.
pub async fn handle_root() -> &'static str {
    "primepost is running"
}

/// Handles GET requests to the `/health` endpoint.
///
/// This endpoint provides a health check for the service, returning the current
/// status and service name. It's commonly used by load balancers and monitoring
/// systems to verify that the service is running and responsive.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "primepost"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "primepost"}))
}

/// Handles POST requests to the `/post` endpoint.
///
/// Runs the daily post immediately, outside the cron schedule.
///
/// # Success Response
///
/// ```json
/// {
///   "status": "success",
///   "id": "<tweet id>",
///   "text": "20261015 = 5 * 37 * 109519"
/// }
/// ```
///
/// # Error Response
///
/// ```json
/// {
///   "status": "error",
///   "message": "Failed to post tweet",
///   "error": "<error details>"
/// }
/// ```
///
/// The status code depends on the failure, see [`status_for_error`].
pub async fn handle_post(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!("Manual daily post requested");
    match run_daily_post(&state.publisher, &state.credentials).await {
        Ok(tweet) => Ok(Json(
            json!({"status": "success", "id": tweet.id, "text": tweet.text}),
        )),
        Err(e) => {
            error!("Failed to post tweet: {}", e);
            Err((
                status_for_error(&e),
                Json(
                    json!({"status": "error", "message": "Failed to post tweet", "error": e.to_string()}),
                ),
            ))
        }
    }
}

/// Chooses the HTTP status returned by `/post` for a publish failure.
pub fn status_for_error(error: &PublishError) -> StatusCode {
    match error {
        PublishError::MissingCredential(_) | PublishError::Signature(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PublishError::InvalidMessage { .. } => StatusCode::BAD_REQUEST,
        PublishError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        PublishError::Transport(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        PublishError::Transport(_)
        | PublishError::Unauthorized
        | PublishError::Forbidden
        | PublishError::UnexpectedStatus { .. }
        | PublishError::ResponseFormat(_) => StatusCode::BAD_GATEWAY,
    }
}
