//! Error types for the publish pipeline.

use std::path::PathBuf;

use crate::error::{ImageError, WordPressError};
use crate::types::TermKind;

/// Failure of one pipeline step.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The local bitmap could not be written.
    #[error("failed to write image file {}: {source}", path.display())]
    Image {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: ImageError,
    },

    /// Media upload failed; nothing else was attempted.
    #[error("media upload failed: {0}")]
    Upload(#[source] WordPressError),

    /// A single tag or category could not be resolved.
    #[error("{kind} '{name}' could not be resolved: {source}")]
    Resolve {
        /// Taxonomy of the term.
        kind: TermKind,
        /// Term name as given.
        name: String,
        /// Underlying error.
        #[source]
        source: WordPressError,
    },

    /// The post could not be created.
    #[error("post creation failed: {0}")]
    PostCreation(#[source] WordPressError),
}
