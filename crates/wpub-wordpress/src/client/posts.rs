//! Post operations for WordPress API.

use tracing::info;

use super::WordPressClient;
use crate::error::WordPressError;
use crate::transport::{HttpRequest, Transport};
use crate::types::{CreatedPost, PostDraft};

/// Status the API returns for a newly created post.
const CREATED: u16 = 201;

impl<T: Transport> WordPressClient<T> {
    /// Create a post.
    ///
    /// Only `201 Created` counts as success; any other status, including
    /// `200`, is returned as [`WordPressError::HttpResponse`].
    pub fn create_post(&self, draft: &PostDraft) -> Result<CreatedPost, WordPressError> {
        let url = format!("{}/posts", self.api_url());
        let payload = serde_json::to_vec(draft)?;

        info!(
            "Creating post '{}' (featured_media={}, {} tag(s), {} category(ies))",
            draft.title,
            draft.featured_media,
            draft.tags.len(),
            draft.categories.len()
        );

        let request = HttpRequest::post(url, payload).header("Content-Type", "application/json");
        let response = self.send(request)?;

        info!("WordPress response status: {}", response.status);
        if response.status != CREATED {
            return Err(response.into_error());
        }

        let post: CreatedPost = response.json().unwrap_or_default();
        Ok(post)
    }
}
