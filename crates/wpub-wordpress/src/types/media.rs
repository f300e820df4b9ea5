//! WordPress media types.

use serde::Deserialize;

/// Uploaded media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    /// Public URL of the uploaded file.
    pub url: String,
    /// Media library ID.
    pub id: u64,
}

/// Media upload response.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaResponse {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) source_url: Option<String>,
}
