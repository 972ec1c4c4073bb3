//! Device catalog retrieval.
//!
//! The catalog is a JSON array of device objects published at a fixed URL.
//! It is fetched fresh for every request; nothing is cached.

mod models;

pub use models::{parse_catalog, DeviceRecord, SupportedVersion};

use log::{debug, error};

use crate::error_handling::{categorize_reqwest_error, FetchError};

/// Fetches and parses the device catalog.
///
/// Performs a single GET with no retry. Any transport error, timeout,
/// non-success status or malformed body is returned as a `FetchError` whose
/// message is meant to be shown to the requester as-is.
///
/// # Errors
///
/// - `FetchError::Http` if the request fails or the status is not 2xx
/// - `FetchError::Json` if the body is not a JSON array. Array elements that
///   are not valid devices are skipped with a warning.
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<DeviceRecord>, FetchError> {
    let result = request_catalog(client, url).await;
    match &result {
        Ok(devices) => debug!("Fetched {} devices from {}", devices.len(), url),
        Err(FetchError::Http(e)) => error!(
            "Error fetching devices data from {} [{}]: {}",
            url,
            categorize_reqwest_error(e),
            e
        ),
        Err(e) => error!("Error parsing devices data from {}: {}", url, e),
    }
    result
}

async fn request_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<DeviceRecord>, FetchError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(parse_catalog(&body)?)
}

/// Codenames of every catalog entry, in catalog order.
pub fn device_codes(catalog: &[DeviceRecord]) -> Vec<&str> {
    catalog.iter().map(|d| d.codename.as_str()).collect()
}
