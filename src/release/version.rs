//! Per-version helpers: selection, display code, status and listing URL.

use crate::catalog::SupportedVersion;
use crate::config::{LATEST_RELEASES, VERSION_DISPLAY_NAMES};

/// The most recent releases of a device: the last two in catalog order.
pub fn latest_versions(versions: &[SupportedVersion]) -> &[SupportedVersion] {
    &versions[versions.len().saturating_sub(LATEST_RELEASES)..]
}

/// Maps internal version codes to their display form.
///
/// Only exact matches in the lookup table are rewritten.
pub fn display_version_code(version_code: &str) -> String {
    VERSION_DISPLAY_NAMES
        .iter()
        .find(|(code, _)| *code == version_code)
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| version_code.to_string())
}

/// `Stable` or `Unstable`, with ` (Deprecated)` appended when flagged.
pub fn version_status(version: &SupportedVersion) -> String {
    let mut status = if version.is_stable {
        String::from("Stable")
    } else {
        String::from("Unstable")
    };
    if version.is_deprecated {
        status.push_str(" (Deprecated)");
    }
    status
}

/// Listing page of one device release: `{base}/{device}/{version}/`.
pub fn file_listing_url(base: &str, device_code: &str, version_code: &str) -> String {
    format!(
        "{}/{}/{}/",
        base.trim_end_matches('/'),
        device_code,
        version_code
    )
}
