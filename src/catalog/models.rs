//! Device catalog data models.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::NO_MAINTAINERS;

/// One supported device as listed in the catalog.
///
/// Optional fields that are missing or `null` fall back to their defaults:
/// no variants, no releases and the "No maintainers" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub codename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(default, alias = "variants", deserialize_with = "null_as_default")]
    pub variant_names: Vec<String>,
    #[serde(
        default = "default_maintainers",
        deserialize_with = "maintainers_from_json"
    )]
    pub maintainers: String,
    /// Entries without a usable `version_code` are dropped.
    #[serde(default, deserialize_with = "versions_from_json")]
    pub supported_versions: Vec<SupportedVersion>,
}

/// One release line of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedVersion {
    pub version_code: String,
    #[serde(rename = "stable", default, deserialize_with = "null_as_default")]
    pub is_stable: bool,
    #[serde(rename = "deprecated", default, deserialize_with = "null_as_default")]
    pub is_deprecated: bool,
}

impl DeviceRecord {
    /// True if `code` is one of this device's variant names.
    pub fn has_variant(&self, code: &str) -> bool {
        self.variant_names.iter().any(|v| v == code)
    }
}

/// Parses a catalog body, dropping entries that are not valid devices.
///
/// # Errors
///
/// Fails only if the body is not a JSON array.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<DeviceRecord>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_slice(body)?;
    Ok(keep_valid(entries, "device"))
}

/// Deserializes each element on its own, logging and skipping failures.
fn keep_valid<T: DeserializeOwned>(entries: Vec<Value>, kind: &str) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed {} entry #{}: {}", kind, index, e);
                None
            }
        })
        .collect()
}

fn versions_from_json<'de, D>(deserializer: D) -> Result<Vec<SupportedVersion>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(keep_valid(entries, "version"))
}

fn default_maintainers() -> String {
    NO_MAINTAINERS.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a single name, a list of names or `null`.
fn maintainers_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Maintainers {
        One(String),
        Many(Vec<String>),
    }

    let joined = match Option::<Maintainers>::deserialize(deserializer)? {
        Some(Maintainers::One(name)) => name.trim().to_string(),
        Some(Maintainers::Many(names)) => names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    };
    if joined.is_empty() {
        Ok(default_maintainers())
    } else {
        Ok(joined)
    }
}
