//! Cronjob module for scheduled tasks.
//!
//! This module schedules the daily post: once per tick it computes today's
//! prime-factorization message and publishes it.

use crate::calc::todays_message;
use crate::config::Credentials;
use crate::error::PublishError;
use crate::twitter::{PostedTweet, Publisher};
use log::{error, info};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Runs the daily post once.
///
/// Composes today's message and publishes it. Credential checks happen inside
/// [`Publisher::publish`]. The outcome is logged and returned; a failure is never
/// retried here.
///
/// # Returns
///
/// - `Ok(PostedTweet)`: The tweet as stored by the API
/// - `Err(PublishError)`: Validation, transport or API failure
pub async fn run_daily_post(
    publisher: &Publisher,
    credentials: &Credentials,
) -> Result<PostedTweet, PublishError> {
    info!("Daily post run started at: {}", chrono::Utc::now().to_rfc3339());

    let message = todays_message();
    info!("Composed message: {}", message);

    match publisher.publish(&message, credentials).await {
        Ok(tweet) => {
            info!("Tweet posted successfully! ID: {}", tweet.id);
            info!("Tweet content: {}", tweet.text);
            Ok(tweet)
        }
        Err(e) => {
            error!("Failed to post tweet: {}", e);
            Err(e)
        }
    }
}

/// Creates the scheduler with a single job that runs [`run_daily_post`].
///
/// # Parameters
///
/// - `publisher`: Shared publisher used by every run
/// - `credentials`: Shared credential bundle used by every run
/// - `schedule`: 7-field cron expression evaluated in UTC, e.g. `"0 0 15 * * * *"`
///   for midnight in Japan
///
/// # Returns
///
/// - `Ok(JobScheduler)`: The configured (not yet started) job scheduler
/// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the scheduler cannot be
///   created or the cron expression is invalid
///
/// # Example
///
/// ```rust,no_run
/// use primepost::{start_daily_post_cronjob, Credentials, Publisher};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let publisher = Arc::new(Publisher::default_api().unwrap());
///     let credentials = Arc::new(Credentials::from_env());
///     let scheduler = start_daily_post_cronjob(publisher, credentials, "0 0 15 * * * *")
///         .await
///         .unwrap();
///     scheduler.start().await.unwrap();
///
///     // Keep the scheduler running
///     tokio::signal::ctrl_c().await.unwrap();
/// }
/// ```
pub async fn start_daily_post_cronjob(
    publisher: Arc<Publisher>,
    credentials: Arc<Credentials>,
    schedule: &str,
) -> Result<JobScheduler, Box<dyn std::error::Error + Send + Sync>> {
    let sched = JobScheduler::new().await?;

    sched
        .add(Job::new_async(schedule, move |_uuid, _l| {
            let publisher = Arc::clone(&publisher);
            let credentials = Arc::clone(&credentials);
            Box::pin(async move {
                info!("Starting scheduled daily post");
                match run_daily_post(&publisher, &credentials).await {
                    Ok(tweet) => {
                        info!("Scheduled daily post completed successfully ({})", tweet.id);
                    }
                    Err(e) => {
                        error!("Scheduled daily post failed: {}", e);
                    }
                }
            })
        })?)
        .await?;

    info!("Cronjob scheduler configured to post with schedule '{}'", schedule);
    Ok(sched)
}
