//! Adapter configuration.

use serde::{Deserialize, Serialize};

/// Knobs for [`PolyAdapter`](super::adapter::PolyAdapter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Reject delegate registration once the first lookup has run, so the
    /// "register everything before rendering" rule is enforced.
    pub seal_on_first_lookup: bool,

    /// Content and payload comparisons between items of different types
    /// fail with `DispatchError::TypeMismatch` instead of answering
    /// `false` / no payload.
    pub strict_diff_types: bool,
}

impl AdapterConfig {
    /// Strict profile for debug builds and tests.
    pub fn strict() -> Self {
        Self {
            seal_on_first_lookup: true,
            strict_diff_types: true,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
