//! Host test doubles.
//!
//! `RecordingHost` captures every outbound host call for later inspection
//! and lets tests script the configuration getters. `NullHost` discards
//! everything. Both live here so downstream crates can drive the engine
//! without an embedding application.

use crate::types::{ClientInfo, NotificationInfo, Platform, UrlComponents, UrlRequest};
use crate::{Host, RequestId, TimerHandle};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Split a URL into components without an external URL library.
///
/// Handles `scheme://host[:port][/path][?query][#fragment]`. Good enough for
/// the http/https/ftp inputs the tests use; a production host supplies its
/// own parser.
pub fn parse_url_components(url: &str) -> Option<UrlComponents> {
    let (scheme, rest) = url.split_once("://")?;
    if scheme.is_empty() {
        return None;
    }

    let (rest, fragment) = match rest.split_once('#') {
        Some((r, f)) => (r, f.to_string()),
        None => (rest, String::new()),
    };
    let (rest, query) = match rest.split_once('?') {
        Some((r, q)) => (r, q.to_string()),
        None => (rest, String::new()),
    };
    let (authority, path) = match rest.find('/') {
        Some(pos) => (&rest[..pos], rest[pos..].to_string()),
        None => (rest, String::new()),
    };
    let (host, port) = match authority.split_once(':') {
        Some((h, p)) => (h.to_string(), p.parse::<u16>().ok()?),
        None => (authority.to_string(), 0),
    };
    if host.is_empty() {
        return None;
    }

    Some(UrlComponents {
        scheme: scheme.to_string(),
        host,
        port,
        path,
        query,
        fragment,
    })
}

/// Scriptable configuration plus a record of every call the engine made.
#[derive(Debug, Clone)]
pub struct RecordingState {
    // Scripted configuration.
    pub ads_enabled: bool,
    pub ads_locale: String,
    pub ads_per_hour: u64,
    pub ads_per_day: u64,
    pub locales: Vec<String>,
    pub platform: Platform,
    pub foreground: bool,
    pub notifications_available: bool,
    pub network_available: bool,
    pub ssid: String,
    /// When set, `set_timer` returns 0 to exercise timer-failure paths.
    pub fail_timers: bool,

    // Recorded calls.
    pub idle_threshold: Option<u64>,
    pub client_state_loads: usize,
    pub saved_client_states: Vec<String>,
    pub saved_catalogs: Vec<String>,
    pub catalog_resets: usize,
    pub saved_bundles: Vec<String>,
    pub sample_bundle_loads: usize,
    pub user_model_loads: Vec<String>,
    pub url_requests: Vec<(RequestId, UrlRequest)>,
    pub ad_requests: Vec<(RequestId, String, String)>,
    pub notifications: Vec<NotificationInfo>,
    pub event_logs: Vec<String>,
    pub live_timers: BTreeMap<TimerHandle, u64>,
    pub killed_timers: Vec<TimerHandle>,

    next_timer: TimerHandle,
    next_request: RequestId,
}

impl Default for RecordingState {
    fn default() -> Self {
        Self {
            ads_enabled: true,
            ads_locale: "en-US".to_string(),
            ads_per_hour: 2,
            ads_per_day: 20,
            locales: vec!["en".to_string()],
            platform: Platform::Linux,
            foreground: true,
            notifications_available: true,
            network_available: true,
            ssid: String::new(),
            fail_timers: false,
            idle_threshold: None,
            client_state_loads: 0,
            saved_client_states: Vec::new(),
            saved_catalogs: Vec::new(),
            catalog_resets: 0,
            saved_bundles: Vec::new(),
            sample_bundle_loads: 0,
            user_model_loads: Vec::new(),
            url_requests: Vec::new(),
            ad_requests: Vec::new(),
            notifications: Vec::new(),
            event_logs: Vec::new(),
            live_timers: BTreeMap::new(),
            killed_timers: Vec::new(),
            next_timer: 0,
            next_request: 0,
        }
    }
}

/// In-memory host that records everything the engine asks of it.
#[derive(Default)]
pub struct RecordingHost {
    state: Mutex<RecordingState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate the scripted configuration or inspect recorded calls.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut RecordingState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn snapshot(&self) -> RecordingState {
        self.state.lock().unwrap().clone()
    }

    /// Handle of the most recently armed timer, if any.
    pub fn last_timer(&self) -> Option<TimerHandle> {
        self.state
            .lock()
            .unwrap()
            .live_timers
            .keys()
            .next_back()
            .copied()
    }

    /// Id of the most recent `get_ads` request, if any.
    pub fn last_ad_request(&self) -> Option<(RequestId, String, String)> {
        self.state.lock().unwrap().ad_requests.last().cloned()
    }
}

impl Host for RecordingHost {
    fn is_ads_enabled(&self) -> bool {
        self.state.lock().unwrap().ads_enabled
    }

    fn ads_locale(&self) -> String {
        self.state.lock().unwrap().ads_locale.clone()
    }

    fn ads_per_hour(&self) -> u64 {
        self.state.lock().unwrap().ads_per_hour
    }

    fn ads_per_day(&self) -> u64 {
        self.state.lock().unwrap().ads_per_day
    }

    fn set_idle_threshold(&self, seconds: u64) {
        self.state.lock().unwrap().idle_threshold = Some(seconds);
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo {
            platform: self.state.lock().unwrap().platform,
            application_version: "0.0.0".to_string(),
        }
    }

    fn locales(&self) -> Vec<String> {
        self.state.lock().unwrap().locales.clone()
    }

    fn generate_uuid(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn ssid(&self) -> String {
        self.state.lock().unwrap().ssid.clone()
    }

    fn is_foreground(&self) -> bool {
        self.state.lock().unwrap().foreground
    }

    fn is_notifications_available(&self) -> bool {
        self.state.lock().unwrap().notifications_available
    }

    fn is_network_connection_available(&self) -> bool {
        self.state.lock().unwrap().network_available
    }

    fn url_components(&self, url: &str) -> Option<UrlComponents> {
        parse_url_components(url)
    }

    fn set_timer(&self, seconds: u64) -> TimerHandle {
        let mut state = self.state.lock().unwrap();
        if state.fail_timers {
            return 0;
        }
        state.next_timer += 1;
        let handle = state.next_timer;
        state.live_timers.insert(handle, seconds);
        handle
    }

    fn kill_timer(&self, handle: TimerHandle) {
        let mut state = self.state.lock().unwrap();
        state.live_timers.remove(&handle);
        state.killed_timers.push(handle);
    }

    fn load_client_state(&self) {
        self.state.lock().unwrap().client_state_loads += 1;
    }

    fn save_client_state(&self, json: &str) {
        self.state
            .lock()
            .unwrap()
            .saved_client_states
            .push(json.to_string());
    }

    fn save_catalog(&self, json: &str) {
        self.state
            .lock()
            .unwrap()
            .saved_catalogs
            .push(json.to_string());
    }

    fn reset_catalog(&self) {
        self.state.lock().unwrap().catalog_resets += 1;
    }

    fn save_bundle_state(&self, json: &str) {
        self.state
            .lock()
            .unwrap()
            .saved_bundles
            .push(json.to_string());
    }

    fn load_sample_bundle(&self) {
        self.state.lock().unwrap().sample_bundle_loads += 1;
    }

    fn load_user_model_for_locale(&self, locale: &str) {
        self.state
            .lock()
            .unwrap()
            .user_model_loads
            .push(locale.to_string());
    }

    fn url_request(&self, request: &UrlRequest) -> RequestId {
        let mut state = self.state.lock().unwrap();
        state.next_request += 1;
        let id = state.next_request;
        state.url_requests.push((id, request.clone()));
        id
    }

    fn get_ads(&self, region: &str, category: &str) -> RequestId {
        let mut state = self.state.lock().unwrap();
        state.next_request += 1;
        let id = state.next_request;
        state
            .ad_requests
            .push((id, region.to_string(), category.to_string()));
        id
    }

    fn show_notification(&self, info: &NotificationInfo) {
        self.state.lock().unwrap().notifications.push(info.clone());
    }

    fn event_log(&self, json: &str) {
        self.state.lock().unwrap().event_logs.push(json.to_string());
    }
}

/// Host that discards every call. Useful where the host is irrelevant.
pub struct NullHost;

impl Host for NullHost {
    fn is_ads_enabled(&self) -> bool {
        false
    }

    fn ads_locale(&self) -> String {
        String::new()
    }

    fn ads_per_hour(&self) -> u64 {
        0
    }

    fn ads_per_day(&self) -> u64 {
        0
    }

    fn set_idle_threshold(&self, _seconds: u64) {}

    fn client_info(&self) -> ClientInfo {
        ClientInfo {
            platform: Platform::Linux,
            application_version: String::new(),
        }
    }

    fn locales(&self) -> Vec<String> {
        Vec::new()
    }

    fn generate_uuid(&self) -> String {
        String::new()
    }

    fn ssid(&self) -> String {
        String::new()
    }

    fn is_foreground(&self) -> bool {
        false
    }

    fn is_notifications_available(&self) -> bool {
        false
    }

    fn is_network_connection_available(&self) -> bool {
        false
    }

    fn url_components(&self, _url: &str) -> Option<UrlComponents> {
        None
    }

    fn set_timer(&self, _seconds: u64) -> TimerHandle {
        0
    }

    fn kill_timer(&self, _handle: TimerHandle) {}

    fn load_client_state(&self) {}

    fn save_client_state(&self, _json: &str) {}

    fn save_catalog(&self, _json: &str) {}

    fn reset_catalog(&self) {}

    fn save_bundle_state(&self, _json: &str) {}

    fn load_sample_bundle(&self) {}

    fn load_user_model_for_locale(&self, _locale: &str) {}

    fn url_request(&self, _request: &UrlRequest) -> RequestId {
        0
    }

    fn get_ads(&self, _region: &str, _category: &str) -> RequestId {
        0
    }

    fn show_notification(&self, _info: &NotificationInfo) {}

    fn event_log(&self, _json: &str) {}
}
