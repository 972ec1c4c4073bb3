//! Configuration types and CLI options.
//!
//! `Config` is usable programmatically through its `Default` impl and doubles
//! as the command-line parser for the binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum_macros::{Display, EnumIter};

use crate::config::constants::*;
use crate::error_handling::InitializationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How a queried device code is matched against the catalog.
///
/// Exactly one mode is active per deployment; the catalog does not guarantee
/// that codenames and variant names are disjoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LookupMode {
    /// Exact match on the device codename
    Codename,
    /// Membership in the device's variant names
    Variant,
}

/// Bot configuration.
///
/// # Examples
///
/// ```no_run
/// use craftrom_bot::Config;
///
/// let config = Config {
///     token: Some("123:abc".to_string()),
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "craftrom_bot", version, about)]
pub struct Config {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Device catalog URL
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Base URL of the release file-listing pages
    #[arg(long, default_value = DEFAULT_FILES_BASE_URL)]
    pub files_base_url: String,

    /// Base URL of the device information pages
    #[arg(long, default_value = DEFAULT_DEVICE_PAGE_BASE_URL)]
    pub device_page_base_url: String,

    /// Telegram Bot API base URL
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Long-poll timeout for getUpdates in seconds
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    pub poll_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Device lookup strategy
    #[arg(long, value_enum, default_value = "codename")]
    pub lookup_mode: LookupMode,

    /// JSON file holding initialized chats
    #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
    pub registry_path: PathBuf,

    /// File containing the bot version string
    #[arg(long, default_value = DEFAULT_VERSION_FILE)]
    pub version_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            files_base_url: DEFAULT_FILES_BASE_URL.to_string(),
            device_page_base_url: DEFAULT_DEVICE_PAGE_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            poll_timeout_seconds: DEFAULT_POLL_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            lookup_mode: LookupMode::Codename,
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
        }
    }
}

impl Config {
    /// Checks that every configured URL parses and the timeouts are usable.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidConfig` naming the offending option.
    pub fn validate(&self) -> Result<(), InitializationError> {
        for (option, value) in [
            ("catalog-url", &self.catalog_url),
            ("files-base-url", &self.files_base_url),
            ("device-page-base-url", &self.device_page_base_url),
            ("api-base-url", &self.api_base_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                InitializationError::InvalidConfig(format!("--{option} '{value}': {e}"))
            })?;
        }
        if self.timeout_seconds == 0 {
            return Err(InitializationError::InvalidConfig(
                "--timeout-seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.token.is_none());
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.poll_timeout_seconds, 30);
        assert_eq!(config.lookup_mode, LookupMode::Codename);
        assert_eq!(config.registry_path, PathBuf::from("channels.json"));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_matches_default() {
        // The CLI defaults and the programmatic defaults must not drift apart
        let parsed = Config::parse_from(["craftrom_bot", "--token", "1:x"]);
        let default = Config::default();
        assert_eq!(parsed.catalog_url, default.catalog_url);
        assert_eq!(parsed.files_base_url, default.files_base_url);
        assert_eq!(parsed.timeout_seconds, default.timeout_seconds);
        assert_eq!(parsed.lookup_mode, default.lookup_mode);
        assert_eq!(parsed.user_agent, default.user_agent);
        assert_eq!(parsed.token.as_deref(), Some("1:x"));
    }

    #[test]
    fn test_lookup_mode_flag() {
        let parsed = Config::parse_from(["craftrom_bot", "--lookup-mode", "variant"]);
        assert_eq!(parsed.lookup_mode, LookupMode::Variant);
    }

    #[test]
    fn test_lookup_mode_display() {
        let names: Vec<String> = LookupMode::iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["codename", "variant"]);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            catalog_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("catalog-url"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
