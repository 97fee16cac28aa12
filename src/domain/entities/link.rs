//! Entities describing allocated short links.

use serde::Serialize;

/// How a short identifier was chosen during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// The caller supplied the identifier and it passed validation.
    Custom,
    /// The registry generated the identifier from the safe alphabet.
    Random,
}

/// Outcome of a successful allocation.
///
/// Carries everything the caller needs to hand out the short link: the
/// claimed identifier, the fully-qualified short URL, and whether the
/// identifier was custom or generated.
#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub identifier: String,
    pub short_link: String,
    pub kind: IdentifierKind,
}
