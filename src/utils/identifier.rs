//! Short identifier generation and validation utilities.
//!
//! Provides random identifier generation from a glyph-safe alphabet and
//! format validation for caller-supplied custom identifiers.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for randomly generated identifiers.
///
/// ASCII alphanumerics minus the visually ambiguous glyphs `0`, `O`, `1`,
/// `l`, and `I`, leaving 57 symbols.
pub const SAFE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

/// Length of randomly generated identifiers.
pub const RANDOM_IDENTIFIER_LEN: usize = 6;

/// Compiled pattern for custom identifier validation.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{4,32}$").unwrap());

/// Generates a random short identifier.
///
/// Each character is drawn independently and uniformly from
/// [`SAFE_ALPHABET`]. The generator keeps no memory of previously issued
/// identifiers; uniqueness is enforced at allocation time through a
/// conditional store write.
///
/// # Examples
///
/// ```ignore
/// let identifier = generate_identifier();
/// assert_eq!(identifier.len(), 6);
/// ```
pub fn generate_identifier() -> String {
    let mut rng = rand::rng();

    (0..RANDOM_IDENTIFIER_LEN)
        .map(|_| SAFE_ALPHABET[rng.random_range(0..SAFE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a caller-supplied custom identifier.
///
/// The raw value is trimmed first. A value that is empty after trimming
/// means "no custom identifier supplied" and yields `Ok(None)`, letting the
/// caller fall through to random generation.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: letters, digits, underscores, hyphens
/// - No normalization beyond trimming; case is preserved exactly
///
/// # Errors
///
/// Returns [`AppError::InvalidIdentifier`] if the trimmed value does not
/// match the format rule.
pub fn validate_custom_identifier(raw: &str) -> Result<Option<String>, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(None);
    }

    if !IDENTIFIER_REGEX.is_match(trimmed) {
        return Err(AppError::invalid_identifier(
            "Custom identifier must be 4-32 characters of letters, digits, '_' or '-'",
            json!({ "identifier": trimmed, "provided_length": trimmed.chars().count() }),
        ));
    }

    Ok(Some(trimmed.to_string()))
}
