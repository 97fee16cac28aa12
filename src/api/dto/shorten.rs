//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Allocation, IdentifierKind};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be http or https).
    pub url: String,

    /// Optional custom identifier. Values that are empty after trimming are
    /// treated as absent.
    #[serde(default)]
    pub custom_id: Option<String>,
}

/// Response for a successful allocation.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub identifier: String,
    pub short_link: String,
    pub kind: IdentifierKind,
}

impl From<Allocation> for ShortenResponse {
    fn from(allocation: Allocation) -> Self {
        Self {
            identifier: allocation.identifier,
            short_link: allocation.short_link,
            kind: allocation.kind,
        }
    }
}
