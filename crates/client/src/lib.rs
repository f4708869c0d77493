//! Durable per-user client state and its mutation operations.
//!
//! Every mutating operation serializes the whole document and hands it to
//! the host for persistence. Saves are fire-and-forget: a failed save keeps
//! the in-memory state authoritative and the next mutation tries again.
//!
//! The host capability is passed into each mutating call rather than stored,
//! so this crate owns only its state.

mod state;

pub use state::ClientState;

use adpulse_host::Host;
use thiserror::Error;

/// Result type for client-state operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The persisted document is not valid JSON.
    #[error("malformed client state JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Manager for the client-state document.
#[derive(Debug)]
pub struct Client {
    state: ClientState,
    page_score_history_size: usize,
}

impl Client {
    pub fn new(page_score_history_size: usize) -> Self {
        Self {
            state: ClientState::default(),
            page_score_history_size,
        }
    }

    /// Replace the in-memory state with a persisted document.
    pub fn load_json(&mut self, json: &str) -> ClientResult<()> {
        self.state = ClientState::parse(json)?;
        Ok(())
    }

    pub fn to_json(&self) -> String {
        self.state.to_json()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    fn save(&self, host: &dyn Host) {
        host.save_client_state(&self.state.to_json());
    }

    // --- page scores -------------------------------------------------------

    /// Record a classification, keeping only the newest vectors.
    pub fn append_page_score(&mut self, host: &dyn Host, score: &[f64]) {
        self.state.page_score_history.push_front(score.to_vec());
        self.state
            .page_score_history
            .truncate(self.page_score_history_size);
        self.save(host);
    }

    /// Coordinate-wise sum of the retained score vectors.
    ///
    /// Empty when there is no history or the vectors disagree on dimension;
    /// the sum is order-invariant.
    pub fn winner_over_time_scores(&self) -> Vec<f64> {
        let Some(front) = self.state.page_score_history.front() else {
            return Vec::new();
        };

        let mut sums = vec![0.0; front.len()];
        for score in &self.state.page_score_history {
            if score.len() != sums.len() {
                return Vec::new();
            }
            for (sum, value) in sums.iter_mut().zip(score) {
                *sum += value;
            }
        }
        sums
    }

    // --- shown history -----------------------------------------------------

    pub fn append_ad_shown(&mut self, host: &dyn Host, now: u64) {
        self.state.ads_shown_history.push(now);
        self.save(host);
    }

    /// Count history entries `t` with `now - t < window_seconds`.
    pub fn ads_shown_recent(&self, window_seconds: u64, now: u64) -> u64 {
        self.state
            .ads_shown_history
            .iter()
            .filter(|&&t| now.checked_sub(t).is_some_and(|age| age < window_seconds))
            .count() as u64
    }

    // --- seen ads ----------------------------------------------------------

    pub fn mark_seen(&mut self, host: &dyn Host, uuid: &str, seen: bool) {
        self.state.ads_uuid_seen.insert(uuid.to_string(), seen);
        self.save(host);
    }

    pub fn is_seen(&self, uuid: &str) -> bool {
        self.state.ads_uuid_seen.get(uuid).copied().unwrap_or(false)
    }

    /// Clear the seen bit for every supplied uuid (round-robin wrap).
    pub fn reset_seen<'a>(&mut self, host: &dyn Host, uuids: impl IntoIterator<Item = &'a str>) {
        for uuid in uuids {
            self.state.ads_uuid_seen.insert(uuid.to_string(), false);
        }
        self.save(host);
    }

    // --- activity flags ----------------------------------------------------

    pub fn flag_shop(&mut self, host: &dyn Host, url: &str) {
        self.state.shop_state = true;
        self.state.shop_url = url.to_string();
        self.save(host);
    }

    pub fn unflag_shop(&mut self, host: &dyn Host) {
        self.state.shop_state = false;
        self.state.shop_url.clear();
        self.save(host);
    }

    pub fn flag_search(&mut self, host: &dyn Host, url: &str) {
        self.state.search_state = true;
        self.state.search_url = url.to_string();
        self.save(host);
    }

    /// Clear the search flag unless the user is still on the flagged page.
    pub fn unflag_search(&mut self, host: &dyn Host, url: &str) {
        if self.state.search_url == url {
            return;
        }
        self.state.search_state = false;
        self.state.search_url.clear();
        self.save(host);
    }

    pub fn search_state(&self) -> bool {
        self.state.search_state
    }

    // --- identity + environment --------------------------------------------

    /// Generate the stable ad uuid on first use.
    pub fn update_ad_uuid(&mut self, host: &dyn Host) {
        if !self.state.ad_uuid.is_empty() {
            return;
        }
        self.state.ad_uuid = host.generate_uuid();
        self.save(host);
    }

    pub fn ad_uuid(&self) -> &str {
        &self.state.ad_uuid
    }

    pub fn set_locale(&mut self, host: &dyn Host, locale: &str) {
        self.state.locale = locale.to_string();
        self.save(host);
    }

    pub fn locale(&self) -> &str {
        &self.state.locale
    }

    pub fn set_locales(&mut self, host: &dyn Host, locales: Vec<String>) {
        self.state.locales = locales;
        self.save(host);
    }

    pub fn set_current_ssid(&mut self, host: &dyn Host, ssid: &str) {
        self.state.current_ssid = ssid.to_string();
        self.save(host);
    }

    /// Label of the current place, falling back to the SSID itself when the
    /// network has no recorded label.
    pub fn current_place(&self) -> String {
        self.state
            .places
            .get(&self.state.current_ssid)
            .cloned()
            .unwrap_or_else(|| self.state.current_ssid.clone())
    }

    pub fn set_available(&mut self, host: &dyn Host, available: bool) {
        self.state.available = available;
        self.save(host);
    }

    pub fn available(&self) -> bool {
        self.state.available
    }

    pub fn update_last_user_activity(&mut self, host: &dyn Host, now: u64) {
        self.state.last_user_activity = now;
        self.save(host);
    }

    pub fn update_last_user_idle_stop_time(&mut self, host: &dyn Host, now: u64) {
        self.state.last_user_idle_stop_time = now;
        self.save(host);
    }

    // --- lifecycle ---------------------------------------------------------

    /// Reset the document to defaults and persist the blank state.
    pub fn remove_all_history(&mut self, host: &dyn Host) {
        tracing::info!("removing all client history");
        self.state = ClientState::default();
        self.save(host);
    }
}
