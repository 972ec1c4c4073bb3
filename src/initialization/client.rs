//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the catalog fetcher, the listing
/// scraper and the Telegram API client.
///
/// The total timeout bounds every request, including long polls; the poll
/// request adds its own long-poll window on top (see `BotApi::get_updates`).
/// The connect timeout is capped at the total timeout so short test
/// configurations still fail fast.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let connect_timeout = timeout.min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
