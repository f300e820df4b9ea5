//! WordPress post types.

use serde::{Deserialize, Serialize};

/// Payload for the post creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Post status (always "publish").
    pub status: &'static str,
    /// Featured image (media library ID).
    pub featured_media: u64,
    /// Tag IDs. Omitted from the payload when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
    /// Category IDs (zero or one). Omitted from the payload when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<u64>,
}

impl PostDraft {
    /// Create a published-post draft without taxonomy.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, featured_media: u64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: "publish",
            featured_media,
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Post creation response.
///
/// Both fields are optional: a `201` is a success even when the body
/// cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedPost {
    /// Post ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Public permalink.
    #[serde(default)]
    pub link: Option<String>,
}
