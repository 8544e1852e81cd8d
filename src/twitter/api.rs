//! Core Twitter API utilities.
//!
//! This module contains the low-level helper for sending OAuth 1.0a signed JSON
//! requests to the Twitter API and mapping the response status.

use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Credentials;
use crate::error::PublishError;
use crate::oauth::OAuth1Signer;

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in bytes before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.len() > max_len {
        let mut cut = max_len;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... [truncated, {} total bytes]",
            &sanitized[..cut],
            text.len()
        )
    } else {
        sanitized
    }
}

/// Sends a signed JSON `POST` and returns the body of a response with `expected` status.
///
/// The request is sent exactly once. Any status other than `expected` is mapped with
/// [`PublishError::from_status`]; its body is only logged.
///
/// # Parameters
///
/// - `client`: The HTTP client (carries the request timeout)
/// - `signer`: Produces the `Authorization` header
/// - `credentials`: The OAuth 1.0a credential bundle
/// - `url`: Target URL, signed exactly as given
/// - `payload`: JSON request body
/// - `expected`: The only status treated as success
/// - `operation_name`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(String)`: The response body
/// - `Err(PublishError)`: Signing, transport or status failure
pub(crate) async fn send_signed_json(
    client: &Client,
    signer: &OAuth1Signer,
    credentials: &Credentials,
    url: &str,
    payload: &Value,
    expected: StatusCode,
    operation_name: &str,
) -> Result<String, PublishError> {
    debug!("Building OAuth 1.0a authorization header for '{}'", operation_name);
    let auth_header = signer.sign("POST", url, "", credentials)?;

    info!("Sending POST request for operation '{}' to {}", operation_name, url);
    debug!("Request headers: Authorization: OAuth [REDACTED], Content-Type: application/json");

    let response = client
        .post(url)
        .header("Authorization", auth_header)
        .header("Content-Type", "application/json")
        .json(payload)
        .send()
        .await
        .map_err(|e| {
            error!("Request for operation '{}' failed: {}", operation_name, e);
            PublishError::Transport(e)
        })?;

    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    if status == expected {
        let body = response.text().await?;
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            body.len()
        );
        return Ok(body);
    }

    error!("Operation '{}' failed - Status: {}", operation_name, status);
    // The status alone decides the error; the body is for the log only.
    match response.text().await {
        Ok(body) => debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&body, 200)
        ),
        Err(e) => debug!(
            "Error response for '{}' could not be read: {}",
            operation_name, e
        ),
    }
    Err(PublishError::from_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_control_characters() {
        assert_eq!(sanitize_for_logging("a\nb\r\tc\u{7}", 100), "a b  c?");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let text = "ééééé";
        let out = sanitize_for_logging(text, 3);
        assert!(out.starts_with("é... [truncated, 10 total bytes]"));
    }
}
