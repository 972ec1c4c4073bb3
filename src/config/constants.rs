//! Configuration constants.
//!
//! Default endpoints, timeouts and the fixed message tables used by the bot.

/// Default device catalog endpoint (JSON array of device objects).
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/craftrom-os/official_devices/master/devices.json";

/// Default base of the per-device, per-version file-listing pages.
///
/// The listing for a release lives at `{base}/{device}/{version}/`.
pub const DEFAULT_FILES_BASE_URL: &str = "https://sourceforge.net/projects/craftrom/files";

/// Default base of the public device information pages.
pub const DEFAULT_DEVICE_PAGE_BASE_URL: &str = "https://craft-rom.pp.ua/devices";

/// Default Telegram Bot API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Default registry file holding initialized chats.
pub const DEFAULT_REGISTRY_PATH: &str = "channels.json";

/// Default file holding the bot version string.
pub const DEFAULT_VERSION_FILE: &str = "version";

/// Per-request timeout in seconds for catalog and listing fetches.
///
/// A timeout is reported exactly like any other fetch failure.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Long-poll timeout passed to `getUpdates`, in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
/// Delay before polling again after a failed `getUpdates` call.
pub const POLL_ERROR_BACKOFF_SECS: u64 = 5;

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("craftrom_bot/", env!("CARGO_PKG_VERSION"));

/// Number of most recent releases reported per device.
pub const LATEST_RELEASES: usize = 2;

/// Internal version codes that are shown with their Android release.
pub const VERSION_DISPLAY_NAMES: &[(&str, &str)] = &[
    ("thrall", "thrall (Android 13)"),
    ("uther", "uther (Android 14)"),
];

/// Sentinel used when a catalog entry carries no maintainers.
pub const NO_MAINTAINERS: &str = "No maintainers";

/// Hashtags that mark a message in the suggestion topic as a suggestion.
pub const SUGGESTION_TAGS: &[&str] = &["#пропозиція", "#proposal", "#suggestion"];

/// First name Telegram gives to accounts that have been deleted.
pub const DELETED_ACCOUNT_NAME: &str = "Deleted Account";

/// Replies used when somebody mentions the bot.
pub const MENTION_RESPONSES: &[&str] = &[
    "Yes, you tagged me. I'm here!",
    "Hello! I'm here, ready to assist you.",
    "You called? I'm ready to help.",
    "Here I am! What can I do for you?",
    "Hi! I'm here, ready to answer your questions.",
];

// Community links shown under every release report
pub const DISCORD_URL: &str = "https://discord.gg/vErZGrSyqD";
pub const CHAT_URL: &str = "http://t.me/craftrom";
pub const NEWS_URL: &str = "http://t.me/craftrom_news";
