//! Persisted bundle form: a category-indexed table of deliverable ads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single creative record ready for delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdEntry {
    pub creative_set_id: String,
    pub regions: Vec<String>,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub advertiser: String,
    pub notification_text: String,
    #[serde(rename = "notificationURL")]
    pub notification_url: String,
    pub uuid: String,
}

/// Region-filtered, category-indexed projection of a catalog.
///
/// `categories` maps segment code to the ads targeting it, preserving
/// catalog order within each category. A `BTreeMap` keeps serialization
/// deterministic: identical inputs produce byte-identical documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BundleState {
    pub catalog_id: String,
    pub catalog_version: u64,
    pub catalog_ping: u64,
    /// Seconds since epoch of the last successful catalog refresh.
    pub catalog_last_updated_timestamp: u64,
    pub categories: BTreeMap<String, Vec<AdEntry>>,
}
