//! User-facing message rendering (Telegram HTML parse mode).
//!
//! Everything here is pure: the same input always renders the same text.

use crate::config::{CHAT_URL, DISCORD_URL, NEWS_URL};
use crate::release::{Availability, ReleaseReport, VersionEntry};

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders a release report.
///
/// `device_page_base_url` is the base of the public device information pages.
pub fn format_report(report: &ReleaseReport, device_page_base_url: &str) -> String {
    let codename = escape_html(&report.codename);
    let versions_text = report
        .versions
        .iter()
        .map(format_version_entry)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "#{codename} #rom\n\
         <b>{brand} | {name}</b>\n\n\
         Device information: <a href=\"{base}/{codename}/\">here</a>\n\n\
         ▪️<b>Device codename:</b> {codename}\n\
         ▪️<b>Maintainer:</b> {maintainers}\n\
         {versions_text}\n\n\n\
         <i>Discuss device's, feature's, or just chat about everything.</i>\n\
         <a href=\"{DISCORD_URL}\">DISCORD CRAFTROM</a> | \
         <a href=\"{CHAT_URL}\">CHAT CRAFTROM</a> | \
         <a href=\"{NEWS_URL}\">NEWS</a>",
        brand = escape_html(&report.brand),
        name = escape_html(&report.name),
        base = device_page_base_url.trim_end_matches('/'),
        maintainers = escape_html(&report.maintainers),
    )
}

fn format_version_entry(entry: &VersionEntry) -> String {
    let code = escape_html(&entry.display_code);
    match &entry.availability {
        Availability::Available(file) => format!(
            "▪️<b>Version:</b> {code}\n \
             • <i>Date:</i> {date}\n \
             • <i>Status:</i> {status}\n \
             • <i>Download:</i> <a href=\"{link}\">{name}</a> ({size})",
            date = file.display_date(),
            status = entry.status,
            link = escape_html(&file.download_link),
            name = escape_html(&file.name),
            size = escape_html(&file.size),
        ),
        Availability::NotAvailable => unavailable_entry(&code, "Not available", &entry.status),
        Availability::ErrorChecking => {
            unavailable_entry(&code, "Error checking availability", &entry.status)
        }
    }
}

/// Entry without a build: the marker replaces the date and download lines.
fn unavailable_entry(code: &str, marker: &str, status: &str) -> String {
    format!("▪️<b>Version:</b> {code} ({marker})\n • <i>Status:</i> {status}")
}

/// Prompt listing every supported codename, sent for a bare `/rom`.
pub fn format_device_list(codes: &[&str]) -> String {
    if codes.is_empty() {
        return "Device code list is empty or not found.".to_string();
    }
    format!(
        "<b>Please specify the device code.</b>\n\
         Example: <code>/rom onclite</code>\n\
         You can also use <code>/rom</code> to get a list of supported devices.\n\n\
         <b>List of supported device codes:</b>\n{}",
        escape_html(&codes.join(", "))
    )
}

pub fn format_not_found(device_code: &str) -> String {
    format!("<b>Device code {} not found.</b>", escape_html(device_code))
}

/// Catalog failure, with the underlying cause shown verbatim.
pub fn format_fetch_error(error: &impl std::fmt::Display) -> String {
    format!("<b>Error:</b> {}", escape_html(&error.to_string()))
}

pub fn welcome_message() -> &'static str {
    "<b>Welcome! This is your bot, ready to assist you.</b>\n\n\
     <b>Description:</b>\n\
     This bot provides information about supported devices for CRAFT ROM, \
     including the latest available versions and download links.\n\n\
     <b>Available Commands:</b>\n\
     <code>/start</code> - Display this welcome message and list of commands.\n\
     <code>/rom [device_code]</code> - Get information about the specified device code.\n\
     <code>/rom</code> - Get a list of all supported device codes.\n\
     <code>/sysinfo</code> - Send host system information to an admin.\n\
     <code>/clean</code> - Remove deleted accounts (admins only).\n\
     <code>/init</code> - Register this chat with the bot (admins only).\n\
     <code>/set_topic</code> - Use the current topic for suggestions (admins only).\n\
     Example: <code>/rom onclite</code>"
}
