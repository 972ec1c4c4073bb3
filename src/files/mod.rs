//! Release file-index scraping.
//!
//! Fetches a release's public file-listing page and turns its table rows into
//! [`FileDescriptor`]s. The first descriptor on a page is the canonical
//! artifact of that release.

mod extract;

pub use extract::{extract_file_rows, extract_files, parse_last_updated, RowOutcome, SkipReason};

use chrono::NaiveDate;
use log::{debug, error};

use crate::error_handling::{categorize_reqwest_error, ScrapeError};

/// One downloadable artifact listed on a release page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    /// Size exactly as the page displays it (e.g. `1.2 GB`)
    pub size: String,
    pub last_modified: NaiveDate,
    /// Absolute or site-relative URL, as found in the row's anchor
    pub download_link: String,
}

impl FileDescriptor {
    /// Last-modified date rendered as `MM/DD/YYYY`.
    pub fn display_date(&self) -> String {
        self.last_modified.format("%m/%d/%Y").to_string()
    }
}

/// Fetches a listing page and extracts its file descriptors.
///
/// Row-level problems are never errors; only a failed request is.
///
/// # Errors
///
/// Returns `ScrapeError::Http` on transport failure, timeout or non-2xx status.
pub async fn fetch_file_index(
    client: &reqwest::Client,
    page_url: &str,
) -> Result<Vec<FileDescriptor>, ScrapeError> {
    let body = client
        .get(page_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let files = extract_files(&body);
    debug!("Found {} files at {}", files.len(), page_url);
    Ok(files)
}

/// Like [`fetch_file_index`], but degrades every failure to an empty list.
pub async fn scrape_file_index(client: &reqwest::Client, page_url: &str) -> Vec<FileDescriptor> {
    match fetch_file_index(client, page_url).await {
        Ok(files) => files,
        Err(e) => {
            log_scrape_error(page_url, &e);
            Vec::new()
        }
    }
}

pub(crate) fn log_scrape_error(page_url: &str, e: &ScrapeError) {
    match e {
        ScrapeError::Http(inner) => error!(
            "Error while extracting files list from {} [{}]: {}",
            page_url,
            categorize_reqwest_error(inner),
            e
        ),
    }
}
