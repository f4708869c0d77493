//! Catalog parse and validation errors.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Reasons a catalog document is rejected as a whole.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON or not the expected shape.
    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document's schema version is not supported.
    #[error("unsupported catalog version {0}")]
    UnsupportedVersion(u64),

    /// The document has no campaigns member.
    #[error("catalog has no campaigns")]
    MissingCampaigns,

    /// A creative set declares an execution model this engine cannot honor.
    #[error("creative set '{creative_set_id}' has unknown execution '{execution}'")]
    UnknownExecution {
        creative_set_id: String,
        execution: String,
    },

    /// A creative declares a type this engine cannot present.
    #[error("creative '{creative_id}' has unknown type '{type_name}'")]
    UnknownCreativeType {
        creative_id: String,
        type_name: String,
    },

    /// A creative set targets no segments, so nothing could ever select it.
    #[error("creative set '{creative_set_id}' has no segments")]
    EmptySegments { creative_set_id: String },
}
