//! Catalog refresher: downloads the catalog, rebuilds the bundle, and
//! decides when to check again.
//!
//! At most one download is in flight per engine instance; a heartbeat that
//! fires while a request is outstanding is dropped. Failures back off
//! exponentially from one minute to a one-hour ceiling, reset on the next
//! success.

use crate::constants::{
    CATALOG_CYCLE_SECONDS, CATALOG_PATH, DEBUG_CATALOG_CYCLE_SECONDS, ONE_HOUR_SECONDS,
    ONE_MINUTE_SECONDS, PRODUCTION_CATALOG_BASE_URL, STAGING_CATALOG_BASE_URL,
};
use adpulse_bundle::Bundle;
use adpulse_catalog::Catalog;
use adpulse_host::{Host, HttpMethod, RequestId, UrlRequest, UrlResponse};

#[derive(Debug)]
pub struct CatalogRefresher {
    url: String,
    /// Minimum seconds between successful refreshes.
    cycle_floor: u64,
    is_verbose: bool,
    in_flight: Option<RequestId>,
    /// Current backoff delay; zero until the first failure.
    retry_offset: u64,
}

impl CatalogRefresher {
    pub fn new(is_debug: bool, is_verbose: bool) -> Self {
        let base = if is_debug {
            STAGING_CATALOG_BASE_URL
        } else {
            PRODUCTION_CATALOG_BASE_URL
        };
        let cycle_floor = if is_debug {
            DEBUG_CATALOG_CYCLE_SECONDS
        } else {
            CATALOG_CYCLE_SECONDS
        };

        Self {
            url: format!("{base}{CATALOG_PATH}"),
            cycle_floor,
            is_verbose,
            in_flight: None,
            retry_offset: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Start a catalog download unless one is already outstanding.
    ///
    /// Returns false only when the host refused the request; the caller
    /// should then schedule a retry via [`Self::backoff`].
    pub fn download(&mut self, host: &dyn Host) -> bool {
        if self.in_flight.is_some() {
            tracing::info!("catalog download already in flight");
            return true;
        }

        let request = UrlRequest {
            url: self.url.clone(),
            headers: Vec::new(),
            body: String::new(),
            content_type: String::new(),
            method: HttpMethod::Get,
        };

        let request_id = host.url_request(&request);
        if request_id == 0 {
            tracing::error!("failed to start catalog download");
            return false;
        }

        tracing::info!(url = %self.url, "catalog download started");
        self.in_flight = Some(request_id);
        true
    }

    pub fn owns_request(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }

    /// Consume a catalog response and return the delay, in seconds, until
    /// the next refresh.
    ///
    /// On success the bundle is rebuilt for `region`, the raw catalog and
    /// the new bundle state are persisted, and the delay honors the
    /// server's ping hint bounded below by the refresh cycle. Any failure
    /// keeps the previous bundle and returns a backoff delay.
    pub fn handle_response(
        &mut self,
        host: &dyn Host,
        bundle: &mut Bundle,
        region: &str,
        response: &UrlResponse,
        now: u64,
    ) -> u64 {
        self.in_flight = None;

        if response.status_code != 200 {
            tracing::error!(
                status = response.status_code,
                "catalog download failed"
            );
            return self.backoff();
        }

        if self.is_verbose {
            tracing::debug!(body = %response.body, "catalog response");
        }

        let catalog = match Catalog::parse(&response.body) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::error!(%error, "rejecting catalog");
                return self.backoff();
            }
        };

        tracing::info!(
            catalog_id = %catalog.catalog_id,
            campaigns = catalog.campaigns.len(),
            "catalog downloaded"
        );

        bundle.build_from(&catalog, region, now);
        host.save_catalog(&response.body);
        host.save_bundle_state(&bundle.to_json());

        self.retry_offset = 0;
        (catalog.ping / 1_000).max(self.cycle_floor)
    }

    /// Advance and return the failure backoff delay.
    pub fn backoff(&mut self) -> u64 {
        self.retry_offset = if self.retry_offset == 0 {
            ONE_MINUTE_SECONDS
        } else {
            (self.retry_offset * 2).min(ONE_HOUR_SECONDS)
        };
        self.retry_offset
    }

    /// Forget any outstanding request and clear the persisted catalog.
    pub fn reset(&mut self, host: &dyn Host) {
        self.in_flight = None;
        self.retry_offset = 0;
        host.reset_catalog();
    }
}
