//! Structured reporting events.
//!
//! Every event is one JSON object `{"data": {"type": ..., "stamp": ...,
//! ...}}` appended to the host's event log. The first event of a process
//! run is preceded by a `restart` record.

use crate::constants::SAMPLE_CATALOG;
use crate::time;
use adpulse_host::{Host, NotificationInfo, NotificationResultKind};
use serde_json::{json, Value};

/// Split a hierarchical category into its path components.
/// `"technology-computing-ai"` -> `["technology", "computing", "ai"]`.
fn split_classification(category: &str) -> Vec<&str> {
    if category.is_empty() {
        return Vec::new();
    }
    category.split('-').collect()
}

fn catalog_label(creative_set_id: &str) -> &str {
    if creative_set_id.is_empty() {
        SAMPLE_CATALOG
    } else {
        creative_set_id
    }
}

/// Writer for the reporting event stream.
#[derive(Debug)]
pub struct Reporter {
    is_first_run: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self { is_first_run: true }
    }

    /// Re-arm the restart record, as after a deinitialize.
    pub fn reset(&mut self) {
        self.is_first_run = true;
    }

    fn emit(&mut self, host: &dyn Host, place: &str, data: Value) {
        if self.is_first_run {
            self.is_first_run = false;
            let restart = json!({
                "data": {
                    "type": "restart",
                    "stamp": time::timestamp_iso8601(),
                    "place": place,
                }
            });
            host.event_log(&restart.to_string());
        }

        host.event_log(&json!({ "data": data }).to_string());
    }

    pub fn notify_shown(&mut self, host: &dyn Host, place: &str, info: &NotificationInfo) {
        let data = json!({
            "type": "notify",
            "stamp": time::timestamp_iso8601(),
            "notificationType": "generated",
            "notificationClassification": split_classification(&info.category),
            "notificationCatalog": catalog_label(&info.creative_set_id),
            "notificationUrl": info.url,
        });
        self.emit(host, place, data);
    }

    pub fn notify_result(
        &mut self,
        host: &dyn Host,
        place: &str,
        info: &NotificationInfo,
        kind: NotificationResultKind,
    ) {
        let notification_type = match kind {
            NotificationResultKind::Clicked => "clicked",
            NotificationResultKind::Dismissed => "dismissed",
            NotificationResultKind::TimedOut => "timeout",
        };
        let data = json!({
            "type": "notify",
            "stamp": time::timestamp_iso8601(),
            "notificationType": notification_type,
            "notificationClassification": split_classification(&info.category),
            "notificationCatalog": catalog_label(&info.creative_set_id),
            "notificationUrl": info.url,
        });
        self.emit(host, place, data);
    }

    pub fn sustain(&mut self, host: &dyn Host, place: &str, info: &NotificationInfo) {
        let data = json!({
            "type": "sustain",
            "stamp": time::timestamp_iso8601(),
            "notificationId": info.uuid,
            "notificationType": "viewed",
        });
        self.emit(host, place, data);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn load(
        &mut self,
        host: &dyn Host,
        place: &str,
        tab_id: i32,
        tab_url: &str,
        is_search: bool,
        classification: &str,
        page_score: Option<&[f64]>,
    ) {
        let mut data = json!({
            "type": "load",
            "stamp": time::timestamp_iso8601(),
            "tabId": tab_id,
            "tabType": if is_search { "search" } else { "click" },
            "tabUrl": tab_url,
            "tabClassification": split_classification(classification),
        });
        if let Some(scores) = page_score {
            data["pageScore"] = json!(scores);
        }
        self.emit(host, place, data);
    }

    pub fn focus(&mut self, host: &dyn Host, place: &str, tab_id: i32) {
        self.tab_event(host, place, "focus", tab_id);
    }

    pub fn blur(&mut self, host: &dyn Host, place: &str, tab_id: i32) {
        self.tab_event(host, place, "blur", tab_id);
    }

    pub fn destroy(&mut self, host: &dyn Host, place: &str, tab_id: i32) {
        self.tab_event(host, place, "destroy", tab_id);
    }

    fn tab_event(&mut self, host: &dyn Host, place: &str, event_type: &str, tab_id: i32) {
        let data = json!({
            "type": event_type,
            "stamp": time::timestamp_iso8601(),
            "tabId": tab_id,
        });
        self.emit(host, place, data);
    }

    pub fn foreground(&mut self, host: &dyn Host, place: &str) {
        self.place_event(host, place, "foreground");
    }

    pub fn background(&mut self, host: &dyn Host, place: &str) {
        self.place_event(host, place, "background");
    }

    fn place_event(&mut self, host: &dyn Host, place: &str, event_type: &str) {
        let data = json!({
            "type": event_type,
            "stamp": time::timestamp_iso8601(),
            "place": place,
        });
        self.emit(host, place, data);
    }

    pub fn settings(
        &mut self,
        host: &dyn Host,
        place: &str,
        notifications_available: bool,
        locale: &str,
        ads_per_day: u64,
        ads_per_hour: u64,
    ) {
        let data = json!({
            "type": "settings",
            "stamp": time::timestamp_iso8601(),
            "settings": {
                "notifications": { "available": notifications_available },
                "place": place,
                "locale": locale,
                "adsPerDay": ads_per_day,
                "adsPerHour": ads_per_hour,
            }
        });
        self.emit(host, place, data);
    }
}
