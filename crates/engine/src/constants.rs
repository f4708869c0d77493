//! Operational policy values: cadences, windows, defaults.

pub const ONE_MINUTE_SECONDS: u64 = 60;
pub const ONE_HOUR_SECONDS: u64 = 3_600;
pub const ONE_DAY_SECONDS: u64 = 86_400;

/// Catalog refresh heartbeat in production builds.
pub const CATALOG_CYCLE_SECONDS: u64 = ONE_HOUR_SECONDS;

/// Catalog refresh heartbeat in debug builds; short enough to watch live.
pub const DEBUG_CATALOG_CYCLE_SECONDS: u64 = 25;

/// Delay before the mobile delivery timer first checks for a servable ad.
pub const DELIVER_NOTIFICATIONS_AFTER_SECONDS: u64 = 120;

/// Delay between a click and the landing-page sustain check.
pub const SUSTAIN_AD_INTERACTION_AFTER_SECONDS: u64 = 10;

/// Cooldown between forced serves from the easter-egg page.
pub const NEXT_EASTER_EGG_SECONDS: u64 = 30;

/// Seconds of inactivity before the host reports the user idle.
pub const IDLE_THRESHOLD_SECONDS: u64 = 15;

/// Page-score vectors retained for the winner-over-time aggregate.
pub const DEFAULT_PAGE_SCORE_HISTORY_SIZE: usize = 5;

pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// Recorded SSID when the host cannot name the current network.
pub const UNKNOWN_SSID: &str = "Unknown";

pub const PRODUCTION_CATALOG_BASE_URL: &str = "https://ads-serve.adpulse.example";
pub const STAGING_CATALOG_BASE_URL: &str = "https://ads-serve-staging.adpulse.example";
pub const CATALOG_PATH: &str = "/v1/catalog";

/// Catalog label reported for ads served outside a real catalog.
pub const SAMPLE_CATALOG: &str = "sample-catalog";
