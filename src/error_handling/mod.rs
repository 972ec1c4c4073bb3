//! Error handling.
//!
//! Errors are split by the layer that produces them:
//! - **Initialization**: logger, HTTP client and configuration problems at startup
//! - **Fetch**: the device catalog could not be obtained (shown to the user)
//! - **Scrape**: a release listing page could not be fetched (degrades one entry)
//! - **Telegram**: Bot API calls failed (logged, never fatal)
//! - **Registry**: the channel registry file could not be read or written

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, ErrorType};
pub use types::{FetchError, InitializationError, RegistryError, ScrapeError, TelegramError};
