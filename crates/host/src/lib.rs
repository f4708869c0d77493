//! Host-capability surface consumed by the ad decision engine.
//!
//! The engine never talks to the operating system, the network, or disk
//! directly. Everything flows through the [`Host`] trait so the core can be
//! embedded in a browser, driven from tests, or run headless.
//!
//! Asynchronous host operations (loads, URL requests, ad queries) are
//! *initiated* here and *completed* by the host invoking the matching
//! `on_*` entry point on the engine, serialized onto the host's main task
//! loop. Saves are fire-and-forget.

mod testing;
mod types;

pub use testing::{parse_url_components, NullHost, RecordingHost, RecordingState};
pub use types::{
    ClientInfo, HttpMethod, NotificationInfo, NotificationResultKind, Platform, UrlComponents,
    UrlRequest, UrlResponse,
};

/// Opaque timer handle assigned by the host. Zero means invalid / no timer.
pub type TimerHandle = u32;

/// Opaque id for an in-flight asynchronous request. Zero means invalid.
pub type RequestId = u64;

/// Capabilities the embedding application provides to the engine.
///
/// Completion contract: the host guarantees every completion callback is
/// delivered on the same task loop the engine runs on, and that no
/// completion is delivered after the engine has been deinitialized.
pub trait Host: Send + Sync {
    // --- configuration -----------------------------------------------------

    fn is_ads_enabled(&self) -> bool;

    /// Locale the ads subsystem is configured for (e.g. `"en-US"`).
    fn ads_locale(&self) -> String;

    fn ads_per_hour(&self) -> u64;

    fn ads_per_day(&self) -> u64;

    /// Seconds of inactivity after which the host reports the user idle.
    fn set_idle_threshold(&self, seconds: u64);

    fn client_info(&self) -> ClientInfo;

    /// Locales a user model is available for.
    fn locales(&self) -> Vec<String>;

    /// Generate a new v4 UUID string.
    fn generate_uuid(&self) -> String;

    /// Current network SSID, or empty when unknown.
    fn ssid(&self) -> String;

    fn is_foreground(&self) -> bool;

    /// Whether the OS currently permits notifications for the host app.
    fn is_notifications_available(&self) -> bool;

    fn is_network_connection_available(&self) -> bool;

    /// Split a URL into its components. `None` when the URL is unparsable.
    fn url_components(&self, url: &str) -> Option<UrlComponents>;

    // --- timers ------------------------------------------------------------

    /// Arm a one-shot timer. Returns 0 on failure. Fires exactly once via
    /// `Engine::on_timer(handle)` unless killed first.
    fn set_timer(&self, seconds: u64) -> TimerHandle;

    /// Cancel a timer; guarantees no subsequent fire for that handle.
    fn kill_timer(&self, handle: TimerHandle);

    // --- storage -----------------------------------------------------------

    /// Completes via `Engine::on_client_state_loaded`.
    fn load_client_state(&self);

    fn save_client_state(&self, json: &str);

    fn save_catalog(&self, json: &str);

    fn reset_catalog(&self);

    fn save_bundle_state(&self, json: &str);

    /// Completes via `Engine::on_sample_bundle_loaded`.
    fn load_sample_bundle(&self);

    /// Completes via `Engine::on_user_model_loaded`.
    fn load_user_model_for_locale(&self, locale: &str);

    // --- networking --------------------------------------------------------

    /// Start an HTTP request. The response arrives via
    /// `Engine::on_url_response(request_id, response)`.
    fn url_request(&self, request: &UrlRequest) -> RequestId;

    // --- ad queries --------------------------------------------------------

    /// Query ads for a region and category from the persisted bundle state.
    /// Completes via `Engine::on_get_ads(request_id, region, category, ads)`.
    fn get_ads(&self, region: &str, category: &str) -> RequestId;

    // --- presentation + reporting ------------------------------------------

    fn show_notification(&self, info: &NotificationInfo);

    /// Append one JSON event record to the reporting stream.
    fn event_log(&self, json: &str);
}
