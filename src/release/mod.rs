//! Release lookup.
//!
//! Cross-references a queried device code with the catalog, picks the most
//! recent releases and checks each release's listing page for its canonical
//! artifact. Every call starts from scratch; nothing is cached between calls.

mod version;

pub use version::{display_version_code, file_listing_url, latest_versions, version_status};

use futures::future::join_all;
use log::{error, info, warn};

use crate::catalog::{DeviceRecord, SupportedVersion};
use crate::config::{Config, LookupMode};
use crate::files::{fetch_file_index, log_scrape_error, FileDescriptor};

/// Result of checking one release's listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The first file on the page.
    Available(FileDescriptor),
    /// The page was fetched but listed no usable files.
    NotAvailable,
    /// The page could not be fetched.
    ErrorChecking,
}

/// One reported release of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    /// Catalog version code, before display substitution
    pub version_code: String,
    /// Version code as shown to users
    pub display_code: String,
    pub status: String,
    pub availability: Availability,
}

/// Composed release information for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub codename: String,
    pub name: String,
    pub brand: String,
    pub maintainers: String,
    /// Entries in catalog order, oldest of the selected releases first
    pub versions: Vec<VersionEntry>,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ReleaseReport),
    /// No catalog entry matched; carries the queried code.
    NotFound(String),
}

/// Finds the catalog entry for `device_code` under the given lookup mode.
pub fn find_device<'a>(
    catalog: &'a [DeviceRecord],
    device_code: &str,
    mode: LookupMode,
) -> Option<&'a DeviceRecord> {
    match mode {
        LookupMode::Codename => catalog.iter().find(|d| d.codename == device_code),
        LookupMode::Variant => catalog.iter().find(|d| d.has_variant(device_code)),
    }
}

/// Resolves device codes into release reports.
#[derive(Debug, Clone)]
pub struct ReleaseResolver {
    client: reqwest::Client,
    files_base_url: String,
    lookup_mode: LookupMode,
}

impl ReleaseResolver {
    pub fn new(client: reqwest::Client, files_base_url: &str, lookup_mode: LookupMode) -> Self {
        Self {
            client,
            files_base_url: files_base_url.to_string(),
            lookup_mode,
        }
    }

    /// Builds a resolver from the bot configuration.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(client, &config.files_base_url, config.lookup_mode)
    }

    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup_mode
    }

    /// Looks up `device_code` and checks its latest releases.
    ///
    /// Release pages are fetched concurrently; a failure on one page only
    /// affects that release's entry.
    pub async fn resolve(&self, catalog: &[DeviceRecord], device_code: &str) -> Resolution {
        let Some(device) = find_device(catalog, device_code, self.lookup_mode) else {
            warn!("Device code {} not found.", device_code);
            return Resolution::NotFound(device_code.to_string());
        };

        let versions = join_all(
            latest_versions(&device.supported_versions)
                .iter()
                .map(|version| self.check_version(&device.codename, version)),
        )
        .await;

        info!(
            "Resolved {} ({} release{})",
            device.codename,
            versions.len(),
            if versions.len() == 1 { "" } else { "s" }
        );

        Resolution::Found(ReleaseReport {
            codename: device.codename.clone(),
            name: device.name.clone(),
            brand: device.brand.clone(),
            maintainers: device.maintainers.clone(),
            versions,
        })
    }

    async fn check_version(&self, device_code: &str, version: &SupportedVersion) -> VersionEntry {
        let url = file_listing_url(&self.files_base_url, device_code, &version.version_code);
        let availability = match fetch_file_index(&self.client, &url).await {
            Ok(files) => match files.into_iter().next() {
                Some(first) => Availability::Available(first),
                None => Availability::NotAvailable,
            },
            Err(e) => {
                log_scrape_error(&url, &e);
                error!(
                    "Error checking availability for device {} version {}",
                    device_code, version.version_code
                );
                Availability::ErrorChecking
            }
        };

        VersionEntry {
            version_code: version.version_code.clone(),
            display_code: display_version_code(&version.version_code),
            status: version_status(version),
            availability,
        }
    }
}
