//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to obtain the device catalog.
///
/// The display string is shown to the requesting user verbatim, so it carries
/// the underlying cause rather than a generic description.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, timeout, or non-success status.
    #[error("{0}")]
    Http(#[from] ReqwestError),

    /// The body was not a JSON array of device objects.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to fetch a release file-listing page.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport failure, timeout, or non-success status.
    #[error("listing request failed: {0}")]
    Http(#[from] ReqwestError),
}

/// Error types for Telegram Bot API calls.
#[derive(Error, Debug)]
pub enum TelegramError {
    /// The request could not be delivered or its body could not be read.
    #[error("Telegram request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The API answered with `ok: false`.
    #[error("Telegram API error ({code}): {description}")]
    Api {
        /// `error_code` from the response envelope (or the HTTP status)
        code: u16,
        /// Human-readable description from the response envelope
        description: String,
    },

    /// The envelope said `ok: true` but the result did not have the expected shape.
    #[error("Unexpected Telegram response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error types for the channel registry file.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Reading or writing the registry file failed.
    #[error("Registry file error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry file does not contain a JSON array of channel records.
    #[error("Registry file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
