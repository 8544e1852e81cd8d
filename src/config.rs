//! Configuration module for the primepost service.
//!
//! This module contains the OAuth 1.0a credential bundle and the environment
//! variable handling for the API base URL, the post schedule and the server port.

use log::{debug, info, warn};
use std::env;
use std::fmt;

/// Default base URL of the Twitter/X API v2.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/2";

/// Default cron expression for the daily post: 15:00 UTC, which is 00:00 JST.
pub const DEFAULT_POST_SCHEDULE: &str = "0 0 15 * * * *";

/// One of the four secrets required for OAuth 1.0a signing.
///
/// The declaration order is the order in which [`Credentials::validate`] checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// The API (consumer) key.
    ConsumerKey,
    /// The API (consumer) secret.
    ConsumerSecret,
    /// The user access token.
    AccessToken,
    /// The user access token secret.
    AccessTokenSecret,
}

impl CredentialField {
    /// All fields in validation order.
    pub const ALL: [CredentialField; 4] = [
        CredentialField::ConsumerKey,
        CredentialField::ConsumerSecret,
        CredentialField::AccessToken,
        CredentialField::AccessTokenSecret,
    ];

    /// The environment variable this field is loaded from.
    pub fn env_var(self) -> &'static str {
        match self {
            CredentialField::ConsumerKey => "TWITTER_API_KEY",
            CredentialField::ConsumerSecret => "TWITTER_API_SECRET",
            CredentialField::AccessToken => "TWITTER_ACCESS_TOKEN",
            CredentialField::AccessTokenSecret => "TWITTER_ACCESS_TOKEN_SECRET",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// Credential bundle for OAuth 1.0a User Context requests.
///
/// The bundle is built once at startup and passed by reference into every publish
/// call. Its `Debug` implementation masks every secret, so it is safe to log.
#[derive(Clone, Default)]
pub struct Credentials {
    /// The API (consumer) key
    pub consumer_key: String,
    /// The API (consumer) secret
    pub consumer_secret: String,
    /// The user access token
    pub access_token: String,
    /// The user access token secret
    pub access_token_secret: String,
    /// App-only bearer token; loaded when present but not used for signing
    pub bearer_token: Option<String>,
}

impl Credentials {
    /// Builds a bundle from the four OAuth 1.0a secrets.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            bearer_token: None,
        }
    }

    /// Loads the credential bundle from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TWITTER_API_KEY`: consumer key
    /// - `TWITTER_API_SECRET`: consumer secret
    /// - `TWITTER_ACCESS_TOKEN`: access token
    /// - `TWITTER_ACCESS_TOKEN_SECRET`: access token secret
    /// - `TWITTER_BEARER_TOKEN`: optional bearer token
    ///
    /// A missing variable is loaded as an empty string rather than failing here, so
    /// that [`Credentials::validate`] reports it with the fixed field precedence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use primepost::Credentials;
    ///
    /// let credentials = Credentials::from_env();
    /// if let Err(e) = credentials.validate() {
    ///     eprintln!("Credentials are incomplete: {}", e);
    /// }
    /// ```
    pub fn from_env() -> Self {
        info!("Loading Twitter credentials from environment variables");

        let credentials = Self {
            consumer_key: load_secret(CredentialField::ConsumerKey.env_var()),
            consumer_secret: load_secret(CredentialField::ConsumerSecret.env_var()),
            access_token: load_secret(CredentialField::AccessToken.env_var()),
            access_token_secret: load_secret(CredentialField::AccessTokenSecret.env_var()),
            bearer_token: Some(load_secret("TWITTER_BEARER_TOKEN")).filter(|t| !t.is_empty()),
        };

        debug!("Loaded credentials: {:?}", credentials);
        credentials
    }

    /// Returns the value of a required field.
    pub fn get(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::ConsumerKey => &self.consumer_key,
            CredentialField::ConsumerSecret => &self.consumer_secret,
            CredentialField::AccessToken => &self.access_token,
            CredentialField::AccessTokenSecret => &self.access_token_secret,
        }
    }

    /// Checks that all four OAuth 1.0a secrets are non-empty.
    ///
    /// Fields are checked in the order consumer key, consumer secret, access token,
    /// access token secret; the first empty one is reported.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: If all four secrets are present
    /// - `Err(PublishError::MissingCredential(field))`: The first missing field
    pub fn validate(&self) -> Result<(), crate::PublishError> {
        match CredentialField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
        {
            Some(field) => {
                warn!("{} is empty", field);
                Err(crate::PublishError::MissingCredential(field))
            }
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &mask_secret(&self.consumer_key))
            .field("consumer_secret", &mask_secret(&self.consumer_secret))
            .field("access_token", &mask_secret(&self.access_token))
            .field("access_token_secret", &mask_secret(&self.access_token_secret))
            .field(
                "bearer_token",
                &self.bearer_token.as_deref().map(mask_secret),
            )
            .finish()
    }
}

fn load_secret(var: &str) -> String {
    match env::var(var) {
        Ok(value) => {
            info!(
                "Found {} environment variable with length: {}",
                var,
                value.len()
            );
            if value.is_empty() {
                warn!("{} is set but empty", var);
            }
            value
        }
        Err(_) => {
            info!("No {} found in environment variables", var);
            String::new()
        }
    }
}

/// Masks a secret for logging, keeping at most a short prefix and suffix.
///
/// Secrets of 16 characters or fewer are fully hidden.
///
/// # Example
///
/// ```rust
/// use primepost::config::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijklmnopqrst"), "abcd...qrst");
/// assert_eq!(mask_secret("sixteen-chars-xx"), "***");
/// assert_eq!(mask_secret(""), "<empty>");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    match chars.len() {
        0 => "<empty>".to_string(),
        1..=16 => "***".to_string(),
        n => format!(
            "{}...{}",
            chars[..4].iter().collect::<String>(),
            chars[n - 4..].iter().collect::<String>()
        ),
    }
}

/// Gets the API base URL from `TWITTER_API_BASE_URL`, defaulting to the public v2 API.
///
/// The value must be an absolute `http` or `https` URL. A trailing slash is removed
/// so that `{base}/tweets` is well-formed.
///
/// # Returns
///
/// - `Ok(String)`: The normalized base URL
/// - `Err(...)`: If the variable is set to something that is not an http(s) URL
pub fn get_api_base_url() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let raw = env::var("TWITTER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let parsed = url::Url::parse(&raw)
        .map_err(|e| format!("TWITTER_API_BASE_URL is not a valid URL ({}): {}", raw, e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "TWITTER_API_BASE_URL must use http or https, got {}",
            parsed.scheme()
        )
        .into());
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Gets the cron expression for the daily post from `POST_SCHEDULE`.
///
/// The expression uses the 7-field format of `tokio-cron-scheduler` and is
/// evaluated in UTC. Defaults to [`DEFAULT_POST_SCHEDULE`].
pub fn get_post_schedule() -> String {
    match env::var("POST_SCHEDULE") {
        Ok(schedule) if !schedule.trim().is_empty() => schedule,
        _ => DEFAULT_POST_SCHEDULE.to_string(),
    }
}

/// Gets the server port from environment variables or returns the default.
///
/// This function reads the `PORT` environment variable and parses it as a u16.
/// If the environment variable is not set, it defaults to 3000.
///
/// # Panics
///
/// This function will panic if the `PORT` environment variable is set to a value
/// that cannot be parsed as a valid port number.
pub fn get_server_port() -> u16 {
    env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a valid number")
}
