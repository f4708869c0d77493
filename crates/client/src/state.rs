//! The durable per-user state document.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Everything the engine remembers about one user, persisted as a single
/// JSON document after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientState {
    pub ads_enabled: bool,
    pub ad_uuid: String,
    pub locale: String,
    pub locales: Vec<String>,
    /// Unix-seconds timestamps of shown notifications, newest last.
    pub ads_shown_history: Vec<u64>,
    /// Creative uuid -> seen flag.
    pub ads_uuid_seen: BTreeMap<String, bool>,
    /// Most recent page-score vectors, newest first, bounded length.
    pub page_score_history: VecDeque<Vec<f64>>,
    pub current_ssid: String,
    pub search_state: bool,
    pub search_url: String,
    pub shop_state: bool,
    pub shop_url: String,
    pub last_user_activity: u64,
    pub last_user_idle_stop_time: u64,
    /// Whether the OS currently permits notifications.
    pub available: bool,
    /// SSID -> place label.
    pub places: BTreeMap<String, String>,
}

impl ClientState {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        // Contains nothing unserializable.
        serde_json::to_string(self).unwrap_or_default()
    }
}
