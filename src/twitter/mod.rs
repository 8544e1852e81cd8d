//! Twitter/X API integration module.
//!
//! This module contains the tweet publisher for the Twitter/X API v2, using
//! OAuth 1.0a User Context authentication.

mod api;
mod tweets;

// Re-export public API
pub use tweets::{validate_message, PostedTweet, Publisher, MAX_TWEET_CHARS, REQUEST_TIMEOUT};
