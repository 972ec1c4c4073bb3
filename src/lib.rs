//! craftrom_bot library: release lookup and the Telegram assistant around it
//!
//! The core is a three-step pipeline: fetch the device catalog, resolve a
//! device code to its supported versions, and scrape each version's file
//! listing for the newest build. The chat layer in [`bot`] answers `/rom`
//! with that pipeline and adds moderation and admin commands.
//!
//! # Example
//!
//! ```no_run
//! use craftrom_bot::{fetch_catalog, format_report, Config, ReleaseResolver, Resolution};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = craftrom_bot::initialization::init_client(&config)?;
//! let catalog = fetch_catalog(&client, &config.catalog_url).await?;
//!
//! let resolver = ReleaseResolver::from_config(client, &config);
//! if let Resolution::Found(report) = resolver.resolve(&catalog, "onclite").await {
//!     println!("{}", format_report(&report, &config.device_page_base_url));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod bot;
pub mod catalog;
pub mod config;
mod error_handling;
pub mod files;
pub mod format;
pub mod initialization;
pub mod registry;
pub mod release;
pub mod system_info;
pub mod telegram;

// Re-export public API
pub use bot::{run_bot, Bot};
pub use catalog::{fetch_catalog, DeviceRecord, SupportedVersion};
pub use config::{Config, LogFormat, LogLevel, LookupMode};
pub use error_handling::{
    categorize_reqwest_error, ErrorType, FetchError, InitializationError, RegistryError,
    ScrapeError, TelegramError,
};
pub use files::{scrape_file_index, FileDescriptor};
pub use format::format_report;
pub use release::{Availability, ReleaseReport, ReleaseResolver, Resolution, VersionEntry};
