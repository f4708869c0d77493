//! Validated catalog model. Immutable after parse.

/// A parsed, validated catalog document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub catalog_id: String,
    pub version: u64,
    /// Refresh hint from the server, in milliseconds.
    pub ping: u64,
    pub campaigns: Vec<Campaign>,
}

impl Catalog {
    /// Parse and validate a catalog JSON document.
    pub fn parse(json: &str) -> crate::CatalogResult<Self> {
        crate::parse::parse(json)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Campaign {
    pub campaign_id: String,
    pub name: String,
    pub start_at: String,
    pub end_at: String,
    pub daily_cap: u64,
    pub budget: u64,
    pub advertiser_id: String,
    pub geo_targets: Vec<GeoTarget>,
    pub creative_sets: Vec<CreativeSet>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTarget {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreativeSet {
    pub creative_set_id: String,
    pub execution: String,
    pub per_day: u64,
    pub total_max: u64,
    /// Never empty after a successful parse.
    pub segments: Vec<Segment>,
    pub creatives: Vec<Creative>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Creative {
    pub creative_id: String,
    pub creative_type: CreativeType,
    pub payload: CreativePayload,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreativeType {
    pub code: String,
    pub name: String,
    pub platform: String,
    pub version: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreativePayload {
    pub body: String,
    pub title: String,
    pub target_url: String,
}
