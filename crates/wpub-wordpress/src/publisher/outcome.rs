//! Result types for publish operations.

use crate::types::{MediaAsset, TermKind};

use super::error::PublishError;

/// Outcome of a publish call.
///
/// Every failure inside the network phase ends up here rather than as an
/// `Err`, so callers only have to look at [`succeeded`](Self::succeeded).
#[derive(Debug)]
pub enum PublishOutcome {
    /// The post was created.
    Published(PublishReport),
    /// A fatal step failed; the error explains which one.
    Failed(PublishError),
}

impl PublishOutcome {
    /// Whether the post was created.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Details of a successful publish.
#[derive(Debug)]
pub struct PublishReport {
    /// Uploaded featured image.
    pub media: MediaAsset,
    /// New post ID, when the response exposed it.
    pub post_id: Option<u64>,
    /// Public permalink, when the response exposed it.
    pub link: Option<String>,
    /// Attached tag IDs in input order.
    pub tag_ids: Vec<u64>,
    /// Attached category IDs (zero or one).
    pub category_ids: Vec<u64>,
    /// Terms that were left off the post.
    pub skipped_terms: Vec<PublishError>,
}

/// Result of resolving one tag or category.
#[derive(Debug)]
pub struct TermResolution {
    /// Taxonomy of the term.
    pub kind: TermKind,
    /// Outcome: the term ID or why it was skipped.
    pub result: Result<u64, PublishError>,
}

/// IDs split by taxonomy, plus the failures.
#[derive(Debug, Default)]
pub(crate) struct ResolvedTerms {
    pub(crate) tag_ids: Vec<u64>,
    pub(crate) category_ids: Vec<u64>,
    pub(crate) skipped: Vec<PublishError>,
}

impl FromIterator<TermResolution> for ResolvedTerms {
    fn from_iter<I: IntoIterator<Item = TermResolution>>(iter: I) -> Self {
        let mut resolved = Self::default();
        for resolution in iter {
            match (resolution.kind, resolution.result) {
                (TermKind::Tag, Ok(id)) => resolved.tag_ids.push(id),
                (TermKind::Category, Ok(id)) => resolved.category_ids.push(id),
                (_, Err(err)) => resolved.skipped.push(err),
            }
        }
        resolved
    }
}
