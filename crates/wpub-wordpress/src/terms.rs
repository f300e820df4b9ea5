//! Parsing of user-supplied taxonomy input.

use std::num::ParseIntError;

/// Split a raw tag string into tag names.
///
/// Newlines act as commas. Segments are trimmed and empty ones dropped;
/// input order is kept and duplicates are not removed.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.replace('\n', ",")
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Interpret an all-digit term input as an explicit ID.
///
/// Returns `None` for anything that is not all digits, and an error for
/// digit strings too large for an ID.
pub(crate) fn numeric_id(input: &str) -> Option<Result<u64, ParseIntError>> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(input.parse())
}

/// Slug sent when creating a term: spaces become hyphens.
pub(crate) fn term_slug(name: &str) -> String {
    name.replace(' ', "-")
}
