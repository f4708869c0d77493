//! Catalog JSON parsing: raw serde DTOs, then a validation pass.
//!
//! Reject conditions fail the whole document: parse error, unsupported
//! version, missing campaigns, a creative set with an unknown execution or
//! no segments, a creative with an unknown type. Records missing their id
//! are skipped silently.

use crate::error::{CatalogError, CatalogResult};
use crate::types::{
    Campaign, Catalog, Creative, CreativePayload, CreativeSet, CreativeType, GeoTarget, Segment,
};
use crate::{EXECUTION_PER_CLICK, SUPPORTED_VERSION, TYPE_NOTIFICATION};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCatalog {
    catalog_id: String,
    version: u64,
    ping: u64,
    campaigns: Option<Vec<RawCampaign>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCampaign {
    campaign_id: Option<String>,
    name: String,
    start_at: String,
    end_at: String,
    daily_cap: u64,
    budget: u64,
    advertiser_id: String,
    geo_targets: Vec<RawGeoTarget>,
    creative_sets: Vec<RawCreativeSet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawGeoTarget {
    code: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCreativeSet {
    creative_set_id: Option<String>,
    execution: Option<String>,
    per_day: u64,
    total_max: u64,
    segments: Vec<RawSegment>,
    creatives: Vec<RawCreative>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSegment {
    code: String,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCreative {
    creative_id: Option<String>,
    #[serde(rename = "type")]
    creative_type: RawCreativeType,
    payload: RawPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCreativeType {
    code: String,
    name: Option<String>,
    platform: String,
    version: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPayload {
    body: String,
    title: String,
    target_url: String,
}

pub(crate) fn parse(json: &str) -> CatalogResult<Catalog> {
    let raw: RawCatalog = serde_json::from_str(json)?;

    if raw.version != SUPPORTED_VERSION {
        return Err(CatalogError::UnsupportedVersion(raw.version));
    }

    let raw_campaigns = raw.campaigns.ok_or(CatalogError::MissingCampaigns)?;

    let mut campaigns = Vec::with_capacity(raw_campaigns.len());
    for raw_campaign in raw_campaigns {
        // Records without an id are skipped, not fatal.
        let Some(campaign_id) = raw_campaign.campaign_id else {
            continue;
        };

        let mut creative_sets = Vec::with_capacity(raw_campaign.creative_sets.len());
        for raw_set in raw_campaign.creative_sets {
            let Some(creative_set_id) = raw_set.creative_set_id else {
                continue;
            };

            let execution = match raw_set.execution {
                Some(execution) if execution != EXECUTION_PER_CLICK => {
                    return Err(CatalogError::UnknownExecution {
                        creative_set_id,
                        execution,
                    });
                }
                Some(execution) => execution,
                None => String::new(),
            };

            if raw_set.segments.is_empty() {
                return Err(CatalogError::EmptySegments { creative_set_id });
            }

            let mut creatives = Vec::with_capacity(raw_set.creatives.len());
            for raw_creative in raw_set.creatives {
                let Some(creative_id) = raw_creative.creative_id else {
                    continue;
                };

                let type_name = match raw_creative.creative_type.name {
                    Some(name) if name != TYPE_NOTIFICATION => {
                        return Err(CatalogError::UnknownCreativeType {
                            creative_id,
                            type_name: name,
                        });
                    }
                    Some(name) => name,
                    None => String::new(),
                };

                creatives.push(Creative {
                    creative_id,
                    creative_type: CreativeType {
                        code: raw_creative.creative_type.code,
                        name: type_name,
                        platform: raw_creative.creative_type.platform,
                        version: raw_creative.creative_type.version,
                    },
                    payload: CreativePayload {
                        body: raw_creative.payload.body,
                        title: raw_creative.payload.title,
                        target_url: raw_creative.payload.target_url,
                    },
                });
            }

            creative_sets.push(CreativeSet {
                creative_set_id,
                execution,
                per_day: raw_set.per_day,
                total_max: raw_set.total_max,
                segments: raw_set
                    .segments
                    .into_iter()
                    .map(|s| Segment {
                        code: s.code,
                        name: s.name,
                    })
                    .collect(),
                creatives,
            });
        }

        campaigns.push(Campaign {
            campaign_id,
            name: raw_campaign.name,
            start_at: raw_campaign.start_at,
            end_at: raw_campaign.end_at,
            daily_cap: raw_campaign.daily_cap,
            budget: raw_campaign.budget,
            advertiser_id: raw_campaign.advertiser_id,
            geo_targets: raw_campaign
                .geo_targets
                .into_iter()
                .map(|g| GeoTarget {
                    code: g.code,
                    name: g.name,
                })
                .collect(),
            creative_sets,
        });
    }

    Ok(Catalog {
        catalog_id: raw.catalog_id,
        version: raw.version,
        ping: raw.ping,
        campaigns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog_json() -> String {
        r#"{
            "catalogId": "d6a9adc5",
            "version": 1,
            "ping": 7200000,
            "campaigns": [{
                "campaignId": "cam-1",
                "name": "Widgets Q3",
                "startAt": "2019-01-01T00:00:00Z",
                "endAt": "2019-12-31T00:00:00Z",
                "dailyCap": 10,
                "budget": 1000,
                "advertiserId": "adv-1",
                "geoTargets": [{"code": "US", "name": "United States"}],
                "creativeSets": [{
                    "creativeSetId": "cs-1",
                    "execution": "per_click",
                    "perDay": 5,
                    "totalMax": 100,
                    "segments": [{"code": "technology-computing", "name": "Tech"}],
                    "creatives": [{
                        "creativeId": "cr-1",
                        "type": {"code": "notification_all_v1", "name": "notification", "platform": "", "version": 1},
                        "payload": {"body": "New widgets", "title": "Acme", "targetUrl": "https://acme.example"}
                    }]
                }]
            }]
        }"#
        .to_string()
    }

    #[test]
    fn test_parse_valid_catalog() {
        let catalog = Catalog::parse(&sample_catalog_json()).unwrap();

        assert_eq!(catalog.catalog_id, "d6a9adc5");
        assert_eq!(catalog.version, 1);
        assert_eq!(catalog.ping, 7_200_000);
        assert_eq!(catalog.campaigns.len(), 1);

        let campaign = &catalog.campaigns[0];
        assert_eq!(campaign.campaign_id, "cam-1");
        assert_eq!(campaign.geo_targets[0].code, "US");

        let set = &campaign.creative_sets[0];
        assert_eq!(set.creative_set_id, "cs-1");
        assert_eq!(set.execution, "per_click");
        assert_eq!(set.segments[0].code, "technology-computing");

        let creative = &set.creatives[0];
        assert_eq!(creative.creative_id, "cr-1");
        assert_eq!(creative.payload.title, "Acme");
        assert_eq!(creative.payload.target_url, "https://acme.example");
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Catalog::parse("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let json = sample_catalog_json().replace("\"version\": 1", "\"version\": 2");
        assert!(matches!(
            Catalog::parse(&json),
            Err(CatalogError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_rejects_missing_version() {
        let json = r#"{"catalogId": "x", "ping": 0, "campaigns": []}"#;
        assert!(matches!(
            Catalog::parse(json),
            Err(CatalogError::UnsupportedVersion(0))
        ));
    }

    #[test]
    fn test_rejects_missing_campaigns() {
        let json = r#"{"catalogId": "x", "version": 1, "ping": 0}"#;
        assert!(matches!(
            Catalog::parse(json),
            Err(CatalogError::MissingCampaigns)
        ));
    }

    #[test]
    fn test_rejects_unknown_execution() {
        let json = sample_catalog_json().replace("per_click", "per_view");
        assert!(matches!(
            Catalog::parse(&json),
            Err(CatalogError::UnknownExecution { .. })
        ));
    }

    #[test]
    fn test_missing_execution_defaults_to_empty() {
        let json = sample_catalog_json().replace("\"execution\": \"per_click\",", "");
        let catalog = Catalog::parse(&json).unwrap();
        assert_eq!(catalog.campaigns[0].creative_sets[0].execution, "");
    }

    #[test]
    fn test_rejects_unknown_creative_type() {
        let json = sample_catalog_json().replace("\"name\": \"notification\"", "\"name\": \"banner\"");
        assert!(matches!(
            Catalog::parse(&json),
            Err(CatalogError::UnknownCreativeType { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_segments() {
        let json = sample_catalog_json().replace(
            r#"[{"code": "technology-computing", "name": "Tech"}]"#,
            "[]",
        );
        assert!(matches!(
            Catalog::parse(&json),
            Err(CatalogError::EmptySegments { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_segments_member() {
        let json = sample_catalog_json().replace(
            r#""segments": [{"code": "technology-computing", "name": "Tech"}],"#,
            "",
        );
        assert!(matches!(
            Catalog::parse(&json),
            Err(CatalogError::EmptySegments { .. })
        ));
    }

    #[test]
    fn test_skips_campaign_without_id() {
        let json = sample_catalog_json().replace("\"campaignId\": \"cam-1\",", "");
        let catalog = Catalog::parse(&json).unwrap();
        assert!(catalog.campaigns.is_empty());
    }

    #[test]
    fn test_skips_creative_set_without_id() {
        let json = sample_catalog_json().replace("\"creativeSetId\": \"cs-1\",", "");
        let catalog = Catalog::parse(&json).unwrap();
        assert!(catalog.campaigns[0].creative_sets.is_empty());
    }

    #[test]
    fn test_skips_creative_without_id() {
        let json = sample_catalog_json().replace("\"creativeId\": \"cr-1\",", "");
        let catalog = Catalog::parse(&json).unwrap();
        assert!(catalog.campaigns[0].creative_sets[0].creatives.is_empty());
    }

    #[test]
    fn test_missing_scalars_default() {
        let json = r#"{
            "catalogId": "x",
            "version": 1,
            "campaigns": [{"campaignId": "cam-1"}]
        }"#;
        let catalog = Catalog::parse(json).unwrap();
        assert_eq!(catalog.ping, 0);

        let campaign = &catalog.campaigns[0];
        assert_eq!(campaign.name, "");
        assert_eq!(campaign.daily_cap, 0);
        assert!(campaign.geo_targets.is_empty());
        assert!(campaign.creative_sets.is_empty());
    }
}
