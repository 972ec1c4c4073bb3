//! File-listing table extraction.
//!
//! Listing pages render one `<tr class="file">` per artifact. Each row is
//! parsed on its own; a row that lacks any required field is reported as
//! skipped and never affects its siblings.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};

use super::FileDescriptor;

// CSS selector strings
const FILE_ROW_SELECTOR_STR: &str = "tr.file";
const NAME_SELECTOR_STR: &str = "span.name";
const SIZE_SELECTOR_STR: &str = r#"td.opt[headers="files_size_h"]"#;
const DATE_SELECTOR_STR: &str = r#"td.opt[headers="files_date_h"] abbr"#;
const LINK_SELECTOR_STR: &str = "a";

/// Timestamp layout of the `title` attribute, without the timezone suffix.
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static FILE_ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(FILE_ROW_SELECTOR_STR));
static NAME_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(NAME_SELECTOR_STR));
static SIZE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(SIZE_SELECTOR_STR));
static DATE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(DATE_SELECTOR_STR));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(LINK_SELECTOR_STR));

/// Parses a static selector, falling back to one that matches nothing.
fn parse_selector(selector_str: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}': {}. Using fallback selector.",
            selector_str,
            e
        );
        Selector::parse("*:not(*)").expect("fallback selector '*:not(*)' always parses")
    })
}

/// Outcome of parsing one file row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// All four fields resolved.
    Parsed(FileDescriptor),
    /// At least one field was missing or unparsable.
    Skipped(SkipReason),
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingName,
    MissingSize,
    MissingDate,
    InvalidDate,
    MissingLink,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SkipReason::MissingName => "missing name",
            SkipReason::MissingSize => "missing size",
            SkipReason::MissingDate => "missing last-updated timestamp",
            SkipReason::InvalidDate => "unparsable last-updated timestamp",
            SkipReason::MissingLink => "missing download link",
        })
    }
}

/// Classifies every file row of a listing page, in document order.
pub fn extract_file_rows(html: &str) -> Vec<RowOutcome> {
    let document = Html::parse_document(html);
    document
        .select(&FILE_ROW_SELECTOR)
        .map(|row| match parse_row(row) {
            Ok(descriptor) => RowOutcome::Parsed(descriptor),
            Err(reason) => RowOutcome::Skipped(reason),
        })
        .collect()
}

/// Returns the well-formed descriptors of a listing page, in document order.
pub fn extract_files(html: &str) -> Vec<FileDescriptor> {
    extract_file_rows(html)
        .into_iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Parsed(descriptor) => Some(descriptor),
            RowOutcome::Skipped(reason) => {
                log::debug!("Skipping file row: {}", reason);
                None
            }
        })
        .collect()
}

fn parse_row(row: ElementRef<'_>) -> Result<FileDescriptor, SkipReason> {
    let name = first_text(row, &NAME_SELECTOR).ok_or(SkipReason::MissingName)?;
    let size = first_text(row, &SIZE_SELECTOR).ok_or(SkipReason::MissingSize)?;
    let stamp = row
        .select(&DATE_SELECTOR)
        .next()
        .and_then(|abbr| abbr.value().attr("title"))
        .ok_or(SkipReason::MissingDate)?;
    let last_modified = parse_last_updated(stamp).ok_or(SkipReason::InvalidDate)?;
    let download_link = row
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .ok_or(SkipReason::MissingLink)?
        .to_string();

    Ok(FileDescriptor {
        name,
        size,
        last_modified,
        download_link,
    })
}

fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text: String = row.select(selector).next()?.text().collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Parses `YYYY-MM-DD HH:MM:SS <TZ>` into its calendar date.
///
/// The timezone abbreviation must be present and alphabetic; it is not used
/// for conversion.
pub fn parse_last_updated(stamp: &str) -> Option<NaiveDate> {
    let (datetime, zone) = stamp.trim().rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    NaiveDateTime::parse_from_str(datetime.trim(), LAST_UPDATED_FORMAT)
        .ok()
        .map(|dt| dt.date())
}
