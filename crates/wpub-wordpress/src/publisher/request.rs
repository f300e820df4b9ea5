//! Publish request.

use crate::bitmap::ImageTensor;
use crate::params::SamplingParams;

/// Everything needed to publish one image as a post.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Post title.
    pub title: String,
    /// Main text of the post.
    pub content: String,
    /// Comma- or newline-separated tag names.
    pub tags: String,
    /// Category name or numeric ID; empty for none.
    pub category: String,
    /// Free-form generation metadata.
    pub metadata: String,
    /// Positive prompt.
    pub positive_prompt: String,
    /// Negative prompt.
    pub negative_prompt: String,
    /// Sampler settings.
    pub params: SamplingParams,
    /// Whether to append the image to the body.
    pub embed_image: bool,
    /// Source image.
    pub image: ImageTensor,
}
