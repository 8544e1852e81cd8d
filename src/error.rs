//! Error types for publishing tweets.
//!
//! [`PublishError`] is the closed set of failures a publish attempt can end in.
//! Nothing in this crate retries on any of them; the caller decides what a
//! failed run means.

use thiserror::Error;

use crate::config::CredentialField;

/// Failure kinds surfaced by [`crate::twitter::Publisher::publish`].
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required OAuth 1.0a secret is empty.
    #[error("{0} is required")]
    MissingCredential(CredentialField),
    /// The message was rejected locally and never sent.
    #[error("invalid tweet text: {reason}")]
    InvalidMessage {
        /// Why the message was rejected.
        reason: String,
    },
    /// The OAuth signature could not be computed.
    #[error("failed to generate OAuth header: {0}")]
    Signature(String),
    /// DNS, connect, TLS or timeout failure while talking to the API.
    #[error("failed to send request")]
    Transport(#[source] reqwest::Error),
    /// HTTP 401.
    #[error("unauthorized: check your Twitter API credentials")]
    Unauthorized,
    /// HTTP 403.
    #[error("forbidden: insufficient permissions")]
    Forbidden,
    /// HTTP 429.
    #[error("rate limit exceeded: please wait before making another request")]
    RateLimited,
    /// Any other non-201 status.
    #[error("API request failed with status: {status} {reason}")]
    UnexpectedStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, empty when the code has none.
        reason: String,
    },
    /// A 201 response whose body is not `{"data":{"id","text"}}`.
    #[error("failed to decode response")]
    ResponseFormat(#[source] serde_json::Error),
}

impl PublishError {
    /// Maps a non-201 HTTP status to its error kind.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            code => Self::UnexpectedStatus {
                status: code,
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}
