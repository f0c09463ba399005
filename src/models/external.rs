use crate::models::Tier;
use serde::{Deserialize, Serialize};

/// Wire shape of an external token export.
///
/// The `tokens` field is required; each element needs a non-empty dotted name
/// and a string value. Anything else fails the read outright.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalBatch {
    pub tokens: Vec<RawExternalToken>,
}

/// One entry of the export file, before normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RawExternalToken {
    pub name: String,
    pub value: String,
}

/// An external token after normalization into internal form
#[derive(Debug, Clone, Serialize)]
pub struct ExternalToken {
    /// Dotted name as supplied by the export (`semantic.color.action`)
    pub source_name: String,
    /// Value as supplied, possibly with `{dotted.ref}` references
    pub source_value: String,
    /// Internal hyphenated name (`--semantic-color-action`)
    pub name: String,
    /// Internal value with `var()` references
    pub value: String,
    /// Tier derived from the first dotted segment
    pub tier: Tier,
    /// Internal names referenced by the value
    pub references: Vec<String>,
}
