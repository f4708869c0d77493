//! The ad decision engine.
//!
//! Consumes host events (navigation, media, foreground/background, idle),
//! drives page classification, refreshes the catalog, applies the frequency
//! policy, selects the most relevant unseen ad for the winning category, and
//! records outcomes on the reporting stream.
//!
//! Everything runs single-threaded on the host's main task loop: host
//! callbacks complete through the `on_*` entry points, and every
//! `Ready`-only handler re-checks readiness so events racing initialization
//! or teardown are dropped.

mod config;
mod time;

pub mod constants;
pub mod frequency;
pub mod locale;
pub mod reporting;
pub mod search_providers;
pub mod serve;

pub use config::EngineConfig;
pub use reporting::Reporter;
pub use serve::CatalogRefresher;

use adpulse_bundle::{AdEntry, Bundle, BundleState};
use adpulse_classifier::Classifier;
use adpulse_client::Client;
use adpulse_host::{
    Host, NotificationInfo, NotificationResultKind, RequestId, TimerHandle, UrlResponse,
};
use constants::{
    CATALOG_CYCLE_SECONDS, DEBUG_CATALOG_CYCLE_SECONDS, DEFAULT_LANGUAGE_CODE,
    DELIVER_NOTIFICATIONS_AFTER_SECONDS, IDLE_THRESHOLD_SECONDS, NEXT_EASTER_EGG_SECONDS,
    ONE_DAY_SECONDS, SUSTAIN_AD_INTERACTION_AFTER_SECONDS, UNKNOWN_SSID,
};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Lifecycle state of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    /// Waiting for the client-state load to complete.
    LoadingState,
    /// Waiting for the user-model load to complete.
    LoadingModel,
    Ready,
    /// The host reported ads disabled at initialization.
    Disabled,
}

/// The decision and scheduling engine.
pub struct Engine {
    host: Arc<dyn Host>,
    config: EngineConfig,
    state: EngineState,

    client: Client,
    bundle: Bundle,
    classifier: Classifier,
    refresher: CatalogRefresher,
    reporter: Reporter,

    is_foreground: bool,
    media_playing: BTreeSet<i32>,
    last_shown_tab_url: String,
    last_page_classification: String,
    page_score_cache: HashMap<String, Vec<f64>>,
    last_shown_notification: NotificationInfo,

    collect_activity_timer: TimerHandle,
    deliver_notifications_timer: TimerHandle,
    sustained_ad_interaction_timer: TimerHandle,
    next_easter_egg: u64,

    /// Outstanding `get_ads` requests: id -> requested category.
    ad_requests: BTreeMap<RequestId, String>,
}

impl Engine {
    pub fn new(host: Arc<dyn Host>, config: EngineConfig) -> Self {
        let client = Client::new(config.page_score_history_size);
        let refresher = CatalogRefresher::new(config.is_debug, config.is_verbose);

        Self {
            host,
            config,
            state: EngineState::Uninitialized,
            client,
            bundle: Bundle::new(),
            classifier: Classifier::new(),
            refresher,
            reporter: Reporter::new(),
            is_foreground: false,
            media_playing: BTreeSet::new(),
            last_shown_tab_url: String::new(),
            last_page_classification: String::new(),
            page_score_cache: HashMap::new(),
            last_shown_notification: NotificationInfo::default(),
            collect_activity_timer: 0,
            deliver_notifications_timer: 0,
            sustained_ad_interaction_timer: 0,
            next_easter_egg: 0,
            ad_requests: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Ready to act on host events: initialized, ads still enabled, and a
    /// user model loaded.
    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
            && self.host.is_ads_enabled()
            && self.classifier.is_initialized()
    }

    // --- lifecycle ---------------------------------------------------------

    /// Begin the initialize sequence: load client state, then the user
    /// model, then finish into `Ready`.
    pub fn initialize(&mut self) {
        if !self.host.is_ads_enabled() {
            tracing::info!("ads disabled, deinitializing");
            self.deinitialize();
            self.state = EngineState::Disabled;
            return;
        }

        if self.state != EngineState::Uninitialized && self.state != EngineState::Disabled {
            tracing::warn!(state = ?self.state, "already initialized");
            return;
        }

        self.state = EngineState::LoadingState;
        self.host.load_client_state();
    }

    /// Tear down: cancel timers, clear the catalog, bundle, classifier and
    /// history, and return to `Uninitialized`.
    pub fn deinitialize(&mut self) {
        if self.state != EngineState::Ready {
            tracing::warn!(state = ?self.state, "not initialized, nothing to deinitialize");
            self.state = EngineState::Uninitialized;
            return;
        }

        tracing::info!("deinitializing");

        let host = Arc::clone(&self.host);
        self.refresher.reset(&*host);
        self.ad_requests.clear();

        self.stop_collecting_activity();
        self.stop_delivering_notifications();
        self.stop_sustaining_ad_interaction();

        self.client.remove_all_history(&*host);
        self.bundle.reset();
        self.classifier.reset();
        self.reporter.reset();

        self.last_shown_notification = NotificationInfo::default();
        self.last_shown_tab_url.clear();
        self.last_page_classification.clear();
        self.page_score_cache.clear();
        self.media_playing.clear();
        self.is_foreground = false;

        self.state = EngineState::Uninitialized;
    }

    /// Completion of `Host::load_client_state`. `None` means the load
    /// failed; either way initialization continues with defaults.
    pub fn on_client_state_loaded(&mut self, result: Option<String>) {
        if self.state != EngineState::LoadingState {
            return;
        }

        match result {
            Some(json) => {
                if let Err(error) = self.client.load_json(&json) {
                    tracing::error!(%error, "failed to parse client state, starting fresh");
                }
            }
            None => tracing::error!("failed to load client state, starting fresh"),
        }

        let host = Arc::clone(&self.host);
        self.client.set_locales(&*host, host.locales());

        self.state = EngineState::LoadingModel;
        self.load_user_model();
    }

    fn load_user_model(&mut self) {
        if self.client.locale().is_empty() {
            let host = Arc::clone(&self.host);
            let language = locale::language_code(&host.ads_locale());
            let chosen = if host.locales().contains(&language) {
                language
            } else {
                DEFAULT_LANGUAGE_CODE.to_string()
            };
            self.client.set_locale(&*host, &chosen);
        }

        self.host.load_user_model_for_locale(self.client.locale());
    }

    /// Completion of `Host::load_user_model_for_locale`.
    pub fn on_user_model_loaded(&mut self, result: Option<String>) {
        if self.state != EngineState::LoadingModel && self.state != EngineState::Ready {
            return;
        }

        let Some(json) = result else {
            tracing::error!("failed to load user model");
            return;
        };

        if let Err(error) = self.classifier.init(&json) {
            tracing::error!(%error, "failed to initialize classifier");
            return;
        }

        if self.state == EngineState::LoadingModel {
            self.finish_initialization();
        }
    }

    fn finish_initialization(&mut self) {
        self.state = EngineState::Ready;
        tracing::info!("initialized");

        let host = Arc::clone(&self.host);
        self.is_foreground = host.is_foreground();
        host.set_idle_threshold(IDLE_THRESHOLD_SECONDS);

        self.notification_allowed_check(false);
        self.retrieve_ssid();

        if self.is_mobile() {
            self.start_delivering_notifications(DELIVER_NOTIFICATIONS_AFTER_SECONDS);
        }

        self.confirm_ad_uuid();
        self.download_catalog();
    }

    fn retrieve_ssid(&mut self) {
        let host = Arc::clone(&self.host);
        let mut ssid = host.ssid();
        if ssid.is_empty() {
            ssid = UNKNOWN_SSID.to_string();
        }
        self.client.set_current_ssid(&*host, &ssid);
    }

    fn confirm_ad_uuid(&mut self) {
        let host = Arc::clone(&self.host);
        if !host.is_ads_enabled() {
            self.stop_collecting_activity();
            return;
        }

        self.client.update_ad_uuid(&*host);

        let cycle = if self.config.is_debug {
            DEBUG_CATALOG_CYCLE_SECONDS
        } else {
            CATALOG_CYCLE_SECONDS
        };
        self.start_collecting_activity(cycle);
    }

    fn is_mobile(&self) -> bool {
        self.host.client_info().platform.is_mobile()
    }

    // --- catalog refresh ---------------------------------------------------

    fn download_catalog(&mut self) {
        let host = Arc::clone(&self.host);
        if !self.refresher.download(&*host) {
            let delay = self.refresher.backoff();
            self.start_collecting_activity(delay);
        }
    }

    /// Completion of `Host::url_request`. Responses for requests the
    /// refresher does not own are dropped.
    pub fn on_url_response(&mut self, request_id: RequestId, response: UrlResponse) {
        if !self.is_ready() {
            return;
        }
        if !self.refresher.owns_request(request_id) {
            tracing::warn!(request_id, "dropping response for unknown request");
            return;
        }

        let host = Arc::clone(&self.host);
        let region = locale::country_code(&host.ads_locale());
        let next_check = self.refresher.handle_response(
            &*host,
            &mut self.bundle,
            &region,
            &response,
            time::now_timestamp(),
        );
        self.start_collecting_activity(next_check);
    }

    fn collect_activity(&mut self) {
        if !self.is_ready() {
            return;
        }
        tracing::info!("collecting activity");
        self.download_catalog();
    }

    // --- timers ------------------------------------------------------------

    /// A host timer fired. Unknown handles are dropped.
    pub fn on_timer(&mut self, timer_id: TimerHandle) {
        if timer_id == 0 {
            return;
        }

        if timer_id == self.collect_activity_timer {
            self.collect_activity_timer = 0;
            self.collect_activity();
        } else if timer_id == self.deliver_notifications_timer {
            self.deliver_notifications_timer = 0;
            self.deliver_notification();
        } else if timer_id == self.sustained_ad_interaction_timer {
            self.sustained_ad_interaction_timer = 0;
            self.sustain_ad_interaction();
        } else {
            tracing::warn!(timer_id, "dropping unknown timer");
        }
    }

    fn start_collecting_activity(&mut self, delay_seconds: u64) {
        self.stop_collecting_activity();

        let handle = self.host.set_timer(delay_seconds);
        if handle == 0 {
            tracing::error!("failed to arm catalog refresh timer");
            return;
        }
        tracing::info!(delay_seconds, "catalog refresh scheduled");
        self.collect_activity_timer = handle;
    }

    fn stop_collecting_activity(&mut self) {
        if self.collect_activity_timer == 0 {
            return;
        }
        self.host.kill_timer(self.collect_activity_timer);
        self.collect_activity_timer = 0;
    }

    pub fn is_collecting_activity(&self) -> bool {
        self.collect_activity_timer != 0
    }

    fn start_delivering_notifications(&mut self, delay_seconds: u64) {
        self.stop_delivering_notifications();

        let handle = self.host.set_timer(delay_seconds);
        if handle == 0 {
            tracing::error!("failed to arm notification delivery timer");
            return;
        }
        tracing::info!(delay_seconds, "notification delivery scheduled");
        self.deliver_notifications_timer = handle;
    }

    fn stop_delivering_notifications(&mut self) {
        if self.deliver_notifications_timer == 0 {
            return;
        }
        self.host.kill_timer(self.deliver_notifications_timer);
        self.deliver_notifications_timer = 0;
    }

    pub fn is_delivering_notifications(&self) -> bool {
        self.deliver_notifications_timer != 0
    }

    fn start_sustaining_ad_interaction(&mut self, delay_seconds: u64) {
        self.stop_sustaining_ad_interaction();

        let handle = self.host.set_timer(delay_seconds);
        if handle == 0 {
            tracing::error!("failed to arm sustain timer");
            return;
        }
        tracing::info!(delay_seconds, "sustain check scheduled");
        self.sustained_ad_interaction_timer = handle;
    }

    fn stop_sustaining_ad_interaction(&mut self) {
        if self.sustained_ad_interaction_timer == 0 {
            return;
        }
        self.host.kill_timer(self.sustained_ad_interaction_timer);
        self.sustained_ad_interaction_timer = 0;
    }

    pub fn is_sustaining_ad_interaction(&self) -> bool {
        self.sustained_ad_interaction_timer != 0
    }

    fn deliver_notification(&mut self) {
        if !self.is_ready() {
            return;
        }

        self.notification_allowed_check(true);

        if self.is_mobile() {
            self.start_delivering_notifications(DELIVER_NOTIFICATIONS_AFTER_SECONDS);
        }
    }

    fn sustain_ad_interaction(&mut self) {
        if !self.is_ready() {
            return;
        }
        if self.last_shown_notification.url != self.last_shown_tab_url {
            tracing::info!("ad landing page no longer in view");
            return;
        }

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter
            .sustain(&*host, &place, &self.last_shown_notification);
    }

    // --- host events -------------------------------------------------------

    pub fn on_foreground(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.is_foreground = true;

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter.foreground(&*host, &place);
    }

    pub fn on_background(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.is_foreground = false;

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter.background(&*host, &place);
    }

    pub fn is_foreground(&self) -> bool {
        self.is_foreground
    }

    pub fn on_media_playing(&mut self, tab_id: i32) {
        if !self.is_ready() {
            return;
        }
        if !self.media_playing.insert(tab_id) {
            return;
        }
        tracing::info!(tab_id, "media playing");
    }

    pub fn on_media_stopped(&mut self, tab_id: i32) {
        if !self.is_ready() {
            return;
        }
        if !self.media_playing.remove(&tab_id) {
            return;
        }
        tracing::info!(tab_id, "media stopped");
    }

    pub fn is_media_playing(&self) -> bool {
        !self.media_playing.is_empty()
    }

    pub fn on_idle(&mut self) {
        if !self.is_ready() {
            return;
        }
        tracing::info!("browser state changed to idle");
    }

    pub fn on_unidle(&mut self) {
        if !self.is_ready() {
            return;
        }
        tracing::info!("browser state changed to unidle");

        let host = Arc::clone(&self.host);
        self.client
            .update_last_user_idle_stop_time(&*host, time::now_timestamp());

        if self.is_mobile() {
            return;
        }

        self.notification_allowed_check(true);
    }

    pub fn tab_updated(&mut self, tab_id: i32, url: &str, is_active: bool, is_incognito: bool) {
        if !self.is_ready() {
            return;
        }
        if is_incognito {
            return;
        }

        let host = Arc::clone(&self.host);
        self.client
            .update_last_user_activity(&*host, time::now_timestamp());

        if self.is_valid_scheme(url) {
            let place = self.client.current_place();
            let is_search = self.client.search_state();
            let classification = self.last_page_classification.clone();
            let page_score = self.page_score_cache.get(url).cloned();
            self.reporter.load(
                &*host,
                &place,
                tab_id,
                url,
                is_search,
                &classification,
                page_score.as_deref(),
            );

            self.check_easter_egg(url);
        }

        let place = self.client.current_place();
        if is_active {
            tracing::info!(tab_id, url, "tab focused");
            self.last_shown_tab_url = url.to_string();

            self.test_shopping_data(url);
            self.test_search_state(url);

            self.reporter.focus(&*host, &place, tab_id);
        } else {
            tracing::info!(tab_id, url, "tab blurred");
            self.reporter.blur(&*host, &place, tab_id);
        }
    }

    pub fn tab_closed(&mut self, tab_id: i32) {
        if !self.is_ready() {
            return;
        }
        tracing::info!(tab_id, "tab closed");

        self.on_media_stopped(tab_id);

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter.destroy(&*host, &place, tab_id);
    }

    /// Classify a page and fold its score into the rolling history.
    pub fn classify_page(&mut self, url: &str, html: &str) {
        if !self.is_ready() {
            return;
        }
        if !self.is_valid_scheme(url) {
            return;
        }

        self.test_shopping_data(url);
        self.test_search_state(url);

        let host = Arc::clone(&self.host);
        let page_score = self.classifier.classify(html);
        self.last_page_classification = self.classifier.winning_category(&page_score);

        self.client.append_page_score(&*host, &page_score);
        self.page_score_cache.insert(url.to_string(), page_score);

        let winner_over_time = self
            .classifier
            .winning_category(&self.client.winner_over_time_scores());
        tracing::info!(
            url,
            immediate_winner = %self.last_page_classification,
            winner_over_time = %winner_over_time,
            "site visited"
        );
    }

    /// Switch locale, falling back to the language code and then the
    /// default, and reload the user model.
    pub fn change_locale(&mut self, locale: &str) {
        if !self.is_ready() {
            return;
        }

        let host = Arc::clone(&self.host);
        let locales = host.locales();

        if locales.iter().any(|available| available == locale) {
            tracing::info!(locale, "changed locale");
            self.client.set_locale(&*host, locale);
        } else {
            let language = locale::language_code(locale);
            let closest = if locales.iter().any(|available| available == &language) {
                language
            } else {
                DEFAULT_LANGUAGE_CODE.to_string()
            };
            tracing::info!(locale, closest = %closest, "locale not available, using closest match");
            self.client.set_locale(&*host, &closest);
        }

        self.load_user_model();
    }

    fn test_shopping_data(&mut self, url: &str) {
        let host = Arc::clone(&self.host);
        let Some(components) = host.url_components(url) else {
            return;
        };

        if components.host == "www.amazon.com" {
            self.client.flag_shop(&*host, url);
        } else {
            self.client.unflag_shop(&*host);
        }
    }

    fn test_search_state(&mut self, url: &str) {
        let host = Arc::clone(&self.host);
        let Some(components) = host.url_components(url) else {
            return;
        };

        if search_providers::is_search_engine(&components) {
            self.client.flag_search(&*host, url);
        } else {
            self.client.unflag_search(&*host, url);
        }
    }

    fn is_valid_scheme(&self, url: &str) -> bool {
        self.host
            .url_components(url)
            .is_some_and(|c| c.scheme == "http" || c.scheme == "https")
    }

    fn check_easter_egg(&mut self, url: &str) {
        if !self.config.is_testing {
            return;
        }
        let Some(components) = self.host.url_components(url) else {
            return;
        };

        let now = time::now_timestamp();
        if components.host == self.config.easter_egg_host && self.next_easter_egg < now {
            tracing::info!("easter egg triggered");
            self.check_ready_ad_serve(true);
            self.next_easter_egg = now + NEXT_EASTER_EGG_SECONDS;
        }
    }

    // --- ad serving --------------------------------------------------------

    fn notification_allowed_check(&mut self, serve: bool) {
        let host = Arc::clone(&self.host);
        let available = host.is_notifications_available();
        let previous = self.client.available();

        if available != previous {
            self.client.set_available(&*host, available);
        }

        if !serve || available != previous {
            self.emit_settings_event();
        }

        if !serve {
            return;
        }

        if !available {
            tracing::info!("ad not served: notifications not presently allowed");
            return;
        }

        if !host.is_network_connection_available() {
            tracing::info!("ad not served: network connection not available");
            return;
        }

        if self.is_catalog_older_than_one_day(time::now_timestamp()) {
            tracing::info!("ad not served: catalog older than one day");
            return;
        }

        self.check_ready_ad_serve(false);
    }

    fn emit_settings_event(&mut self) {
        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        let locale = self.client.locale().to_string();
        self.reporter.settings(
            &*host,
            &place,
            host.is_notifications_available(),
            &locale,
            host.ads_per_day(),
            host.ads_per_hour(),
        );
    }

    fn is_catalog_older_than_one_day(&self, now: u64) -> bool {
        let updated = self.bundle.catalog_last_updated_timestamp();
        updated != 0 && now > updated + ONE_DAY_SECONDS
    }

    /// Gate for a non-forced serve: readiness, foreground (desktop), media,
    /// and the frequency policy; then serve for the winning category.
    pub fn check_ready_ad_serve(&mut self, forced: bool) {
        if !self.is_ready() || !self.bundle.is_ready() {
            tracing::info!("notification not made: not initialized");
            return;
        }

        if !forced {
            if !self.is_mobile() && !self.is_foreground {
                tracing::info!("notification not made: not in foreground");
                return;
            }

            if self.is_media_playing() {
                tracing::info!("notification not made: media playing in browser");
                return;
            }

            if !self.is_allowed_to_show_ads() {
                tracing::info!("notification not made: not allowed based on history");
                return;
            }
        }

        let scores = self.client.winner_over_time_scores();
        let category = self.classifier.winning_category(&scores);
        self.serve_ad_from_category(&category);
    }

    fn is_allowed_to_show_ads(&self) -> bool {
        frequency::is_allowed(
            &self.client.state().ads_shown_history,
            time::now_timestamp(),
            self.host.ads_per_hour(),
            self.host.ads_per_day(),
        )
    }

    fn serve_ad_from_category(&mut self, category: &str) {
        if self.bundle.catalog_id().is_empty() {
            tracing::info!("notification not made: no ad catalog");
            return;
        }

        if category.is_empty() {
            tracing::info!("notification not made: no winning category");
            return;
        }

        let host = Arc::clone(&self.host);
        let region = locale::country_code(&host.ads_locale());
        let request_id = host.get_ads(&region, category);
        if request_id == 0 {
            tracing::error!(category, "failed to request ads");
            return;
        }
        self.ad_requests.insert(request_id, category.to_string());
    }

    /// Completion of `Host::get_ads`. An empty result for a hierarchical
    /// category retries once per level with the parent category.
    pub fn on_get_ads(
        &mut self,
        request_id: RequestId,
        region: &str,
        category: &str,
        ads: Vec<AdEntry>,
    ) {
        if !self.is_ready() {
            return;
        }
        if self.ad_requests.remove(&request_id).is_none() {
            tracing::warn!(request_id, "dropping ads for unknown request");
            return;
        }

        let host = Arc::clone(&self.host);

        if ads.is_empty() {
            if let Some(position) = category.rfind('-') {
                let parent = &category[..position];
                tracing::info!(category, parent, "no ads found, retrying with parent category");

                let retry_id = host.get_ads(region, parent);
                if retry_id != 0 {
                    self.ad_requests.insert(retry_id, parent.to_string());
                }
                return;
            }

            tracing::info!(category, "notification not made: no ads found");
            return;
        }

        let mut unseen = self.unseen_ads(&ads);
        if unseen.is_empty() {
            tracing::info!(category, "ad round-robin: resetting seen ads");
            self.client
                .reset_seen(&*host, ads.iter().map(|ad| ad.uuid.as_str()));

            unseen = self.unseen_ads(&ads);
            if unseen.is_empty() {
                tracing::info!(category, "notification not made: no ads found");
                return;
            }
        }

        let index = rand::thread_rng().gen_range(0..unseen.len());
        let ad = unseen.swap_remove(index);
        self.show_ad(&ad, category);
    }

    fn unseen_ads(&self, ads: &[AdEntry]) -> Vec<AdEntry> {
        ads.iter()
            .filter(|ad| !self.client.is_seen(&ad.uuid))
            .cloned()
            .collect()
    }

    fn show_ad(&mut self, ad: &AdEntry, category: &str) -> bool {
        if ad.advertiser.is_empty()
            || ad.notification_text.is_empty()
            || ad.notification_url.is_empty()
        {
            tracing::info!(uuid = %ad.uuid, "notification not made: incomplete ad information");
            return false;
        }

        let info = NotificationInfo {
            advertiser: ad.advertiser.clone(),
            category: category.to_string(),
            text: ad.notification_text.clone(),
            url: ad.notification_url.clone(),
            creative_set_id: ad.creative_set_id.clone(),
            uuid: ad.uuid.clone(),
        };
        self.last_shown_notification = info.clone();

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter.notify_shown(&*host, &place, &info);

        host.show_notification(&info);
        self.client.append_ad_shown(&*host, time::now_timestamp());

        tracing::info!(
            category,
            advertiser = %info.advertiser,
            url = %info.url,
            "notification shown"
        );
        true
    }

    /// The host resolved a shown notification.
    pub fn on_notification_result(&mut self, info: NotificationInfo, kind: NotificationResultKind) {
        if !self.is_ready() {
            return;
        }

        let host = Arc::clone(&self.host);
        let place = self.client.current_place();
        self.reporter.notify_result(&*host, &place, &info, kind);

        match kind {
            NotificationResultKind::Clicked => {
                self.client.mark_seen(&*host, &info.uuid, true);
                self.start_sustaining_ad_interaction(SUSTAIN_AD_INTERACTION_AFTER_SECONDS);
            }
            NotificationResultKind::Dismissed => {
                self.client.mark_seen(&*host, &info.uuid, true);
            }
            NotificationResultKind::TimedOut => {}
        }
    }

    // --- sample ads --------------------------------------------------------

    /// Serve one ad from the host's sample bundle, bypassing the catalog.
    pub fn serve_sample_ad(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.host.load_sample_bundle();
    }

    /// Completion of `Host::load_sample_bundle`.
    pub fn on_sample_bundle_loaded(&mut self, result: Option<String>) {
        if !self.is_ready() {
            return;
        }

        let Some(json) = result else {
            tracing::error!("failed to load sample bundle");
            return;
        };

        let sample: BundleState = match serde_json::from_str(&json) {
            Ok(sample) => sample,
            Err(error) => {
                tracing::error!(%error, "failed to parse sample bundle");
                return;
            }
        };

        if sample.categories.is_empty() {
            tracing::info!("notification not made: no sample bundle categories");
            return;
        }

        let category_index = rand::thread_rng().gen_range(0..sample.categories.len());
        let Some((category, ads)) = sample.categories.iter().nth(category_index) else {
            return;
        };

        if ads.is_empty() {
            tracing::info!(category, "notification not made: no sample ads for category");
            return;
        }

        let ad = ads[rand::thread_rng().gen_range(0..ads.len())].clone();
        let category = category.clone();
        self.show_ad(&ad, &category);
    }

    // --- introspection -----------------------------------------------------

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn last_shown_notification(&self) -> &NotificationInfo {
        &self.last_shown_notification
    }

    pub fn last_shown_tab_url(&self) -> &str {
        &self.last_shown_tab_url
    }

    pub fn last_page_classification(&self) -> &str {
        &self.last_page_classification
    }
}
