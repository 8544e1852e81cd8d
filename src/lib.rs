//! # Primepost Library
//!
//! A scheduled Twitter/X bot that posts the prime factorization of today's date
//! (Japan Standard Time). Tweets are created through the API v2 `POST /tweets`
//! endpoint using OAuth 1.0a User Context authentication (HMAC-SHA1).
//!
//! ## Features
//!
//! - OAuth 1.0a request signing with injectable nonce and clock sources
//! - Tweet publisher with a typed error for every failure kind
//! - Daily cronjob and a manual trigger endpoint
//! - Structured logging
//! - Health check endpoint
//!
//! ## Configuration
//!
//! The following environment variables are read:
//! - `TWITTER_API_KEY`, `TWITTER_API_SECRET`: consumer key and secret
//! - `TWITTER_ACCESS_TOKEN`, `TWITTER_ACCESS_TOKEN_SECRET`: user access token and secret
//! - `TWITTER_BEARER_TOKEN`: optional, not used for signing
//! - `TWITTER_API_BASE_URL`: API base (defaults to `https://api.twitter.com/2`)
//! - `POST_SCHEDULE`: cron expression in UTC (defaults to `0 0 15 * * * *`, midnight JST)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a banner
//! - `GET /health`: Returns service health status
//! - `POST /post`: Posts today's message immediately

pub mod calc;
pub mod config;
pub mod cronjob;
pub mod error;
pub mod handlers;
pub mod oauth;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_api_base_url, get_post_schedule, get_server_port, CredentialField, Credentials};
pub use cronjob::{run_daily_post, start_daily_post_cronjob};
pub use error::PublishError;
pub use handlers::{build_router, handle_health, handle_root, AppState};
pub use oauth::{build_oauth1_header, Clock, NonceSource, OAuth1Signer};
pub use twitter::{PostedTweet, Publisher};

#[cfg(test)]
mod tests;
