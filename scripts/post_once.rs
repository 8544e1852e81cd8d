//! One-shot Tweet Posting Script
//!
//! Posts a single tweet and exits. With no arguments it posts today's prime
//! factorization; otherwise the arguments, joined by spaces, are posted as-is.
//!
//! Credentials are read from `TWITTER_API_KEY`, `TWITTER_API_SECRET`,
//! `TWITTER_ACCESS_TOKEN` and `TWITTER_ACCESS_TOKEN_SECRET`.
//!
//! ```bash
//! cargo run --bin post_once
//! cargo run --bin post_once -- "Hello from Rust!"
//! ```

use log::{error, info};
use primepost::{calc::todays_message, get_api_base_url, Credentials, Publisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let message = if args.is_empty() {
        todays_message()
    } else {
        args.join(" ")
    };
    info!(
        "Tweet length: {} characters",
        message.chars().count()
    );

    let credentials = Credentials::from_env();
    let publisher = Publisher::new(get_api_base_url()?)?;

    match publisher.publish(&message, &credentials).await {
        Ok(tweet) => {
            println!("Tweet posted: {} ({})", tweet.id, tweet.text);
            Ok(())
        }
        Err(e) => {
            error!("Failed to post tweet: {}", e);
            Err(e.into())
        }
    }
}
