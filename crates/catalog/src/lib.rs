//! Catalog document model and parser.
//!
//! A catalog is the full advertising inventory served by the upstream API:
//! campaigns containing creative sets, which contain creatives and the
//! segments they target. Parsing validates the whole document; a single
//! structural violation rejects the catalog so a half-understood inventory
//! is never served from.

mod error;
mod parse;
mod types;

pub use error::{CatalogError, CatalogResult};
pub use types::{
    Campaign, Catalog, Creative, CreativePayload, CreativeSet, CreativeType, GeoTarget, Segment,
};

/// The only catalog schema version this engine understands.
pub const SUPPORTED_VERSION: u64 = 1;

/// The only creative-set execution model this engine understands.
pub const EXECUTION_PER_CLICK: &str = "per_click";

/// The only creative type this engine understands.
pub const TYPE_NOTIFICATION: &str = "notification";
