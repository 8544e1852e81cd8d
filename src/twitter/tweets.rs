//! Tweet publishing for the Twitter API v2.
//!
//! [`Publisher`] posts a single tweet per call to `POST {base}/tweets`, signed with
//! OAuth 1.0a User Context credentials.

use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::config::{Credentials, DEFAULT_API_BASE_URL};
use crate::error::PublishError;
use crate::oauth::OAuth1Signer;

use super::api::{sanitize_for_logging, send_signed_json};

/// Timeout applied to every request sent by a [`Publisher`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum tweet length accepted before any network activity, in characters.
pub const MAX_TWEET_CHARS: usize = 280;

/// A tweet as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedTweet {
    /// Identifier assigned by the API
    pub id: String,
    /// The text as the API stored it
    pub text: String,
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: PostedTweet,
}

/// Posts tweets to the Twitter/X API v2.
///
/// A publisher owns a reqwest [`Client`] with a fixed 30 second timeout and an
/// [`OAuth1Signer`]. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct Publisher {
    client: Client,
    base_url: String,
    signer: OAuth1Signer,
}

impl Publisher {
    /// Creates a publisher for the given API base URL (e.g. `https://api.twitter.com/2`).
    ///
    /// # Returns
    ///
    /// - `Ok(Publisher)`: On success
    /// - `Err(PublishError::Transport)`: If the HTTP client cannot be constructed
    pub fn new(base_url: impl Into<String>) -> Result<Self, PublishError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a publisher for the public API at [`DEFAULT_API_BASE_URL`].
    pub fn default_api() -> Result<Self, PublishError> {
        Self::new(DEFAULT_API_BASE_URL)
    }

    /// Wraps an existing client. The caller is responsible for its timeout.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: OAuth1Signer::new(),
        }
    }

    /// Replaces the signer, e.g. with one using fixed nonce and clock sources.
    pub fn with_signer(mut self, signer: OAuth1Signer) -> Self {
        self.signer = signer;
        self
    }

    /// The full URL of the create-tweet endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/tweets", self.base_url)
    }

    /// Posts `message` as a new tweet.
    ///
    /// Credentials and message are validated before any network activity. The
    /// request is sent once; HTTP 201 is the only success status.
    ///
    /// # Parameters
    ///
    /// - `message`: The text content of the tweet to post
    /// - `credentials`: The OAuth 1.0a credential bundle
    ///
    /// # Returns
    ///
    /// - `Ok(PostedTweet)`: The id and text echoed back by the API
    /// - `Err(PublishError)`: See [`PublishError`] for the failure kinds
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use primepost::{Credentials, Publisher};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let publisher = Publisher::default_api().unwrap();
    ///     let credentials = Credentials::from_env();
    ///     match publisher.publish("Hello from Rust!", &credentials).await {
    ///         Ok(tweet) => println!("Tweet posted: {}", tweet.id),
    ///         Err(e) => eprintln!("Failed to post tweet: {}", e),
    ///     }
    /// }
    /// ```
    pub async fn publish(
        &self,
        message: &str,
        credentials: &Credentials,
    ) -> Result<PostedTweet, PublishError> {
        info!(
            "Starting tweet post operation for text: '{}'",
            sanitize_for_logging(message, 100)
        );

        credentials.validate()?;
        validate_message(message)?;

        let url = self.endpoint();
        let payload = json!({ "text": message });
        debug!("Tweet payload: {}", payload);

        let body = send_signed_json(
            &self.client,
            &self.signer,
            credentials,
            &url,
            &payload,
            StatusCode::CREATED,
            "post_tweet",
        )
        .await?;

        let response: CreateTweetResponse =
            serde_json::from_str(&body).map_err(PublishError::ResponseFormat)?;

        info!("Tweet posted successfully! ID: {}", response.data.id);
        Ok(response.data)
    }
}

/// Rejects empty and over-length tweet text.
///
/// Length is counted in Unicode scalar values against [`MAX_TWEET_CHARS`].
pub fn validate_message(message: &str) -> Result<(), PublishError> {
    if message.trim().is_empty() {
        return Err(PublishError::InvalidMessage {
            reason: "tweet text cannot be empty".to_string(),
        });
    }

    let length = message.chars().count();
    if length > MAX_TWEET_CHARS {
        return Err(PublishError::InvalidMessage {
            reason: format!(
                "tweet is {} characters, the limit is {}",
                length, MAX_TWEET_CHARS
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message_bounds() {
        assert!(validate_message("20240101 = 7 * 41 * 109 * 647").is_ok());
        assert!(validate_message(&"x".repeat(MAX_TWEET_CHARS)).is_ok());
        // multi-byte characters count once each
        assert!(validate_message(&"あ".repeat(MAX_TWEET_CHARS)).is_ok());

        assert!(matches!(
            validate_message(""),
            Err(PublishError::InvalidMessage { .. })
        ));
        assert!(matches!(
            validate_message("  \n"),
            Err(PublishError::InvalidMessage { .. })
        ));
        assert!(matches!(
            validate_message(&"x".repeat(MAX_TWEET_CHARS + 1)),
            Err(PublishError::InvalidMessage { .. })
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let publisher = Publisher::with_client(Client::new(), "https://api.twitter.com/2/");
        assert_eq!(publisher.endpoint(), "https://api.twitter.com/2/tweets");
    }
}
