//! Bundle: the region-filtered, category-indexed projection of a catalog
//! that ad selection runs against.
//!
//! The bundle mirrors the catalog lifecycle (rebuilt atomically on every
//! successful refresh) and is additionally persisted through the host so a
//! restart can serve ads before the first refresh completes.

mod state;

pub use state::{AdEntry, BundleState};

use adpulse_catalog::Catalog;
use thiserror::Error;

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

#[derive(Debug, Error)]
pub enum BundleError {
    /// The persisted bundle document is not valid JSON.
    #[error("malformed bundle JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Owner of the current bundle state.
///
/// Rebuild is atomic: `build_from` assembles a complete replacement before
/// swapping it in, so readers observe either the old or the new projection,
/// never a torn one.
#[derive(Debug, Default)]
pub struct Bundle {
    state: BundleState,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project `catalog` for `region`, stamped with the refresh time.
    ///
    /// A campaign contributes only when one of its geo targets matches
    /// `region`. Every creative of a qualifying creative set is appended to
    /// each segment the set targets, preserving catalog order.
    pub fn build_from(&mut self, catalog: &Catalog, region: &str, now: u64) {
        let mut state = BundleState {
            catalog_id: catalog.catalog_id.clone(),
            catalog_version: catalog.version,
            catalog_ping: catalog.ping,
            catalog_last_updated_timestamp: now,
            ..Default::default()
        };

        for campaign in &catalog.campaigns {
            if !campaign.geo_targets.iter().any(|g| g.code == region) {
                continue;
            }

            let regions: Vec<String> =
                campaign.geo_targets.iter().map(|g| g.code.clone()).collect();

            for creative_set in &campaign.creative_sets {
                for creative in &creative_set.creatives {
                    let entry = AdEntry {
                        creative_set_id: creative_set.creative_set_id.clone(),
                        regions: regions.clone(),
                        start_timestamp: campaign.start_at.clone(),
                        end_timestamp: campaign.end_at.clone(),
                        advertiser: creative.payload.title.clone(),
                        notification_text: creative.payload.body.clone(),
                        notification_url: ensure_url_scheme(&creative.payload.target_url),
                        uuid: creative.creative_id.clone(),
                    };

                    for segment in &creative_set.segments {
                        state
                            .categories
                            .entry(segment.code.clone())
                            .or_default()
                            .push(entry.clone());
                    }
                }
            }
        }

        self.state = state;
    }

    /// Restore a previously persisted bundle document.
    pub fn load_json(&mut self, json: &str) -> BundleResult<()> {
        let mut state: BundleState = serde_json::from_str(json)?;
        for ads in state.categories.values_mut() {
            for ad in ads {
                ad.notification_url = ensure_url_scheme(&ad.notification_url);
            }
        }
        self.state = state;
        Ok(())
    }

    pub fn to_json(&self) -> String {
        // BundleState contains nothing unserializable.
        serde_json::to_string(&self.state).unwrap_or_default()
    }

    /// Whether any category has ads to select from.
    pub fn is_ready(&self) -> bool {
        !self.state.categories.is_empty()
    }

    pub fn catalog_id(&self) -> &str {
        &self.state.catalog_id
    }

    pub fn catalog_ping(&self) -> u64 {
        self.state.catalog_ping
    }

    pub fn catalog_last_updated_timestamp(&self) -> u64 {
        self.state.catalog_last_updated_timestamp
    }

    pub fn state(&self) -> &BundleState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = BundleState::default();
    }
}

/// Prefix bare URLs with `http://`; already-schemed URLs pass through.
fn ensure_url_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
