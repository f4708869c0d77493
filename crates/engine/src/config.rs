//! Immutable engine configuration, injected at construction.

use crate::constants::DEFAULT_PAGE_SCORE_HISTORY_SIZE;

/// Build-time switches and tunables for one engine instance.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Enables the easter-egg forced serve.
    pub is_testing: bool,
    /// Selects the staging catalog endpoint and the short refresh cadence.
    pub is_debug: bool,
    /// Logs full catalog responses.
    pub is_verbose: bool,
    /// Host whose page loads trigger the easter-egg serve when testing.
    pub easter_egg_host: String,
    /// Page-score vectors retained for the winner-over-time aggregate.
    pub page_score_history_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            is_testing: false,
            is_debug: false,
            is_verbose: false,
            easter_egg_host: "ads.example.com".to_string(),
            page_score_history_size: DEFAULT_PAGE_SCORE_HISTORY_SIZE,
        }
    }
}
