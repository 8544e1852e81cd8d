//! OAuth 1.0a request signing for Twitter/X API integration.
//!
//! This module builds the `Authorization: OAuth ...` header for User Context
//! requests signed with HMAC-SHA1. The nonce and the timestamp are the only inputs
//! that vary between calls; both come from injectable sources ([`NonceSource`] and
//! [`Clock`]) so a signature can be reproduced exactly.
//!
//! Percent-encoding follows RFC 3986: only `A-Z a-z 0-9 - . _ ~` pass through
//! unchanged, a space becomes `%20`. All sorting is byte-wise over UTF-8 strings.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use log::debug;
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::Credentials;
use crate::error::PublishError;

type HmacSha1 = Hmac<Sha1>;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
/// Number of characters in a generated nonce.
pub const NONCE_LENGTH: usize = 32;

/// Source of per-request nonces.
pub trait NonceSource: Send + Sync {
    /// Returns a fresh nonce.
    fn nonce(&self) -> String;
}

/// Source of the `oauth_timestamp` value.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch.
    fn unix_timestamp(&self) -> i64;
}

/// Draws nonces from the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNonce;

impl NonceSource for ThreadRngNonce {
    fn nonce(&self) -> String {
        generate_nonce()
    }
}

/// Reads the wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Generates a 32-character nonce drawn uniformly from `[A-Za-z0-9]`.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Percent-encodes a string as required by OAuth 1.0a (RFC 3986 unreserved set kept).
///
/// # Example
///
/// ```rust
/// use primepost::oauth::percent_encode;
///
/// assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
/// assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
/// ```
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Signs requests with OAuth 1.0a HMAC-SHA1.
///
/// The signer holds no per-request state; each call to [`OAuth1Signer::sign`] draws
/// its own nonce and timestamp, so one signer can be shared across tasks.
#[derive(Clone)]
pub struct OAuth1Signer {
    nonce_source: Arc<dyn NonceSource>,
    clock: Arc<dyn Clock>,
}

impl Default for OAuth1Signer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OAuth1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Signer").finish_non_exhaustive()
    }
}

impl OAuth1Signer {
    /// Creates a signer using the thread-local RNG and the system clock.
    pub fn new() -> Self {
        Self::with_sources(Arc::new(ThreadRngNonce), Arc::new(SystemClock))
    }

    /// Creates a signer with custom nonce and time sources.
    pub fn with_sources(nonce_source: Arc<dyn NonceSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            nonce_source,
            clock,
        }
    }

    /// Builds the `Authorization` header value for one request.
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method, any case
    /// - `url`: Request URL without query string
    /// - `extra_query`: Additional `name=value&...` pairs to sign, may be empty
    /// - `credentials`: The OAuth 1.0a credential bundle
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The header value, starting with `OAuth `
    /// - `Err(PublishError::Signature)`: If `extra_query` is not valid percent-encoding
    pub fn sign(
        &self,
        method: &str,
        url: &str,
        extra_query: &str,
        credentials: &Credentials,
    ) -> Result<String, PublishError> {
        let nonce = self.nonce_source.nonce();
        let timestamp = self.clock.unix_timestamp();
        build_oauth1_header(method, url, extra_query, credentials, &nonce, timestamp)
    }
}

/// Builds the `Authorization` header from a fixed nonce and timestamp.
///
/// This is the deterministic core of [`OAuth1Signer::sign`]: the same inputs always
/// produce the same header.
///
/// # Format
///
/// ```text
/// OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...", oauth_signature_method="HMAC-SHA1", oauth_timestamp="...", oauth_token="...", oauth_version="1.0"
/// ```
pub fn build_oauth1_header(
    method: &str,
    url: &str,
    extra_query: &str,
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Result<String, PublishError> {
    let mut params = oauth_params(credentials, nonce, timestamp);

    let base_string = signature_base_string(method, url, &params, extra_query)?;
    debug!("OAuth signature base string built ({} bytes)", base_string.len());

    let key = signing_key(&credentials.consumer_secret, &credentials.access_token_secret);
    let signature = hmac_sha1_base64(&key, &base_string)?;
    params.insert("oauth_signature".to_string(), signature);

    let mut header_parts: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, percent_encode(value)))
        .collect();
    header_parts.sort();

    Ok(format!("OAuth {}", header_parts.join(", ")))
}

/// Assembles the six fixed OAuth protocol parameters.
pub fn oauth_params(
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "oauth_consumer_key".to_string(),
            credentials.consumer_key.clone(),
        ),
        ("oauth_nonce".to_string(), nonce.to_string()),
        (
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        ),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.access_token.clone()),
        ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
    ])
}

/// Builds the signature base string `METHOD&enc(url)&enc(sorted params)`.
///
/// Pairs from `extra_query` are decoded first and re-encoded alongside the OAuth
/// parameters, so callers may pass either raw or already-encoded query strings.
pub fn signature_base_string(
    method: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    extra_query: &str,
) -> Result<String, PublishError> {
    let mut pairs: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{}={}", percent_encode(name), percent_encode(value)))
        .collect();

    for segment in extra_query.split('&').filter(|s| !s.is_empty()) {
        let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
        pairs.push(format!(
            "{}={}",
            percent_encode(&decode_component(name)?),
            percent_encode(&decode_component(value)?)
        ));
    }

    pairs.sort();

    Ok(format!(
        "{}&{}&{}",
        percent_encode(&method.to_ascii_uppercase()),
        percent_encode(url),
        percent_encode(&pairs.join("&"))
    ))
}

/// Builds the HMAC key `enc(consumer_secret)&enc(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Computes `base64(HMAC-SHA1(key, message))`.
pub fn hmac_sha1_base64(key: &str, message: &str) -> Result<String, PublishError> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PublishError::Signature(format!("invalid HMAC key: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn decode_component(raw: &str) -> Result<String, PublishError> {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            PublishError::Signature(format!("query component {:?} is not valid UTF-8: {}", raw, e))
        })
}
