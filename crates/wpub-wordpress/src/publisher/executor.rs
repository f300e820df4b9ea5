//! Publish pipeline implementation.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{error, info, warn};

use crate::bitmap::{BITMAP_MIME, materialize};
use crate::client::WordPressClient;
use crate::content::{PostContent, assemble};
use crate::error::{ImageError, WordPressError};
use crate::terms::parse_tag_list;
use crate::transport::Transport;
use crate::types::{MediaAsset, PostDraft, TermKind};

use super::error::PublishError;
use super::outcome::{PublishOutcome, PublishReport, ResolvedTerms, TermResolution};
use super::request::PublishRequest;

/// Publishes images as WordPress posts.
pub struct Publisher<'a, T: Transport> {
    client: &'a WordPressClient<T>,
    image_file: PathBuf,
}

impl<'a, T: Transport> Publisher<'a, T> {
    /// Create a publisher writing its intermediate bitmap to `image_file`.
    #[must_use]
    pub fn new(client: &'a WordPressClient<T>, image_file: impl Into<PathBuf>) -> Self {
        Self {
            client,
            image_file: image_file.into(),
        }
    }

    /// Publish a request.
    ///
    /// This method:
    /// 1. Validates the image shape and writes the bitmap file
    /// 2. Uploads the bitmap to the media library
    /// 3. Resolves tags and the category (failures only skip that term)
    /// 4. Assembles the HTML body
    /// 5. Creates the post
    ///
    /// # Errors
    ///
    /// Returns [`ImageError`] only when the image cannot be reduced to an
    /// RGB frame. Every later failure is reported as
    /// [`PublishOutcome::Failed`].
    pub fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, ImageError> {
        let frame = request.image.to_rgb_image()?;

        info!("Publishing '{}' to WordPress", request.title);

        match self.run(request, &frame) {
            Ok(report) => {
                info!("Post published to WordPress");
                Ok(PublishOutcome::Published(report))
            }
            Err(err) => {
                error!("Error publishing post: {err}");
                Ok(PublishOutcome::Failed(err))
            }
        }
    }

    fn run(&self, request: &PublishRequest, frame: &RgbImage) -> Result<PublishReport, PublishError> {
        self.write_bitmap(frame)?;

        let media = self
            .client
            .upload_media_as(&self.image_file, BITMAP_MIME)
            .map_err(PublishError::Upload)?;

        let terms: ResolvedTerms = self.resolve_terms(request).into_iter().collect();
        for skipped in &terms.skipped {
            warn!("{skipped}");
        }

        let draft = Self::build_draft(request, &media, &terms);
        let post = self
            .client
            .create_post(&draft)
            .map_err(PublishError::PostCreation)?;

        Ok(PublishReport {
            media,
            post_id: post.id,
            link: post.link,
            tag_ids: terms.tag_ids,
            category_ids: terms.category_ids,
            skipped_terms: terms.skipped,
        })
    }

    fn write_bitmap(&self, frame: &RgbImage) -> Result<(), PublishError> {
        materialize(frame, &self.image_file).map_err(|source| PublishError::Image {
            path: self.image_file.clone(),
            source,
        })?;
        info!("Image saved: {}", self.image_file.display());
        Ok(())
    }

    /// Resolve every tag, then the category, one request at a time.
    fn resolve_terms(&self, request: &PublishRequest) -> Vec<TermResolution> {
        let tags = parse_tag_list(&request.tags);
        let category = request.category.trim();

        let wanted = tags
            .iter()
            .map(|name| (name.as_str(), TermKind::Tag))
            .chain((!category.is_empty()).then_some((category, TermKind::Category)));

        wanted
            .map(|(name, kind)| TermResolution {
                kind,
                result: self.resolve_term(name, kind),
            })
            .collect()
    }

    fn resolve_term(&self, name: &str, kind: TermKind) -> Result<u64, PublishError> {
        self.client
            .resolve_term(name, kind)
            .map(|term| term.id)
            .map_err(|source: WordPressError| PublishError::Resolve {
                kind,
                name: name.to_owned(),
                source,
            })
    }

    fn build_draft(request: &PublishRequest, media: &MediaAsset, terms: &ResolvedTerms) -> PostDraft {
        let html = assemble(&PostContent {
            title: &request.title,
            body: &request.content,
            metadata: &request.metadata,
            positive_prompt: &request.positive_prompt,
            negative_prompt: &request.negative_prompt,
            params: &request.params,
            media,
            embed_image: request.embed_image,
        });

        let mut draft = PostDraft::new(request.title.as_str(), html, media.id);
        draft.tags.clone_from(&terms.tag_ids);
        draft.categories.clone_from(&terms.category_ids);
        draft
    }

    /// Path of the intermediate bitmap.
    pub fn image_file(&self) -> &Path {
        &self.image_file
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::bitmap::ImageTensor;
    use crate::client::tests::mock_client;
    use crate::mock::MockTransport;
    use crate::params::SamplingParams;
    use crate::transport::Method;

    fn request(tags: &str, category: &str) -> PublishRequest {
        PublishRequest {
            title: "T".to_owned(),
            content: "B".to_owned(),
            tags: tags.to_owned(),
            category: category.to_owned(),
            metadata: String::new(),
            positive_prompt: String::new(),
            negative_prompt: String::new(),
            params: SamplingParams::default(),
            embed_image: true,
            image: ImageTensor::new(vec![1, 2, 2, 3], vec![0.5; 12]).unwrap(),
        }
    }

    fn upload_ok(transport: MockTransport) -> MockTransport {
        transport.with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": 9, "source_url": "http://h/i.png"}),
        )
    }

    fn published(outcome: PublishOutcome) -> PublishReport {
        match outcome {
            PublishOutcome::Published(report) => report,
            PublishOutcome::Failed(err) => panic!("Expected success, got {err:?}"),
        }
    }

    #[test]
    fn test_end_to_end_new_tags_no_category() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new())
                .with_json(Method::Get, "/tags", 200, json!([]))
                .with_json(Method::Post, "/tags", 201, json!({"id": 3}))
                .with_json(Method::Get, "/tags", 200, json!([]))
                .with_json(Method::Post, "/tags", 201, json!({"id": 4}))
                .with_json(
                    Method::Post,
                    "/posts",
                    201,
                    json!({"id": 100, "link": "http://h/?p=100"}),
                ),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let outcome = publisher.publish(&request("x,y", "")).unwrap();
        assert!(outcome.succeeded());

        let report = published(outcome);
        assert_eq!(report.tag_ids, vec![3, 4]);
        assert!(report.category_ids.is_empty());
        assert_eq!(report.post_id, Some(100));

        let posts = client.transport().requests_to(Method::Post, "/posts");
        assert_eq!(posts.len(), 1);
        let payload = posts[0].json_body().unwrap();
        assert_eq!(payload["featured_media"], json!(9));
        assert_eq!(payload["tags"], json!([3, 4]));
        assert_eq!(payload["status"], json!("publish"));
        assert_eq!(payload["title"], json!("T"));
        assert!(payload.get("categories").is_none());
        let content = payload["content"].as_str().unwrap();
        assert!(content.contains("<img src='http://h/i.png' style='max-width:100%;'>"));

        let tag_creates = client.transport().requests_to(Method::Post, "/tags");
        assert_eq!(
            tag_creates[0].json_body().unwrap(),
            json!({"name": "x", "slug": "x"})
        );
        assert_eq!(
            tag_creates[1].json_body().unwrap(),
            json!({"name": "y", "slug": "y"})
        );
    }

    #[test]
    fn test_requests_are_sequential_in_pipeline_order() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new())
                .with_json(Method::Get, "/tags", 200, json!([{"id": 1, "name": "sky"}]))
                .with_json(
                    Method::Get,
                    "/categories",
                    200,
                    json!([{"id": 6, "name": "Landscapes"}]),
                )
                .with_json(Method::Post, "/posts", 201, json!({"id": 1})),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let outcome = publisher.publish(&request("sky", "landscapes")).unwrap();
        let report = published(outcome);
        assert_eq!(report.tag_ids, vec![1]);
        assert_eq!(report.category_ids, vec![6]);

        let order: Vec<_> = client
            .transport()
            .requests()
            .iter()
            .map(|r| (r.method, r.path().rsplit('/').next().unwrap_or("").to_owned()))
            .collect();
        assert_eq!(order, vec![
            (Method::Post, "media".to_owned()),
            (Method::Get, "tags".to_owned()),
            (Method::Get, "categories".to_owned()),
            (Method::Post, "posts".to_owned()),
        ]);
    }

    #[test]
    fn test_upload_failure_stops_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(MockTransport::new().with_response(
            Method::Post,
            "/media",
            500,
            "internal error",
        ));
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let outcome = publisher.publish(&request("x,y", "Art")).unwrap();

        assert!(!outcome.succeeded());
        assert!(matches!(
            outcome,
            PublishOutcome::Failed(PublishError::Upload(_))
        ));
        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.ends_with("/media"));
    }

    #[test]
    fn test_upload_connection_error_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(MockTransport::new().with_connection_error(Method::Post, "/media"));
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let outcome = publisher.publish(&request("", "")).unwrap();
        assert!(!outcome.succeeded());
    }

    #[test]
    fn test_post_200_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(upload_ok(MockTransport::new()).with_json(
            Method::Post,
            "/posts",
            200,
            json!({"id": 100}),
        ));
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let outcome = publisher.publish(&request("", "")).unwrap();

        assert!(!outcome.succeeded());
        match outcome {
            PublishOutcome::Failed(PublishError::PostCreation(WordPressError::HttpResponse {
                status,
                ..
            })) => assert_eq!(status, 200),
            other => panic!("Expected PostCreation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_tag_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new())
                .with_json(Method::Get, "/tags", 200, json!([]))
                .with_response(Method::Post, "/tags", 400, "term_exists")
                .with_json(Method::Get, "/tags", 200, json!([{"id": 4, "name": "Y"}]))
                .with_json(Method::Post, "/posts", 201, json!({})),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let report = published(publisher.publish(&request("x\ny", "")).unwrap());

        assert_eq!(report.tag_ids, vec![4]);
        assert_eq!(report.skipped_terms.len(), 1);
        assert!(matches!(
            &report.skipped_terms[0],
            PublishError::Resolve { kind: TermKind::Tag, name, .. } if name == "x"
        ));
        let payload = client.transport().requests_to(Method::Post, "/posts")[0]
            .json_body()
            .unwrap();
        assert_eq!(payload["tags"], json!([4]));
    }

    #[test]
    fn test_failed_category_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new())
                .with_json(Method::Get, "/categories", 200, json!([]))
                .with_response(Method::Post, "/categories", 403, "forbidden")
                .with_json(Method::Post, "/posts", 201, json!({"id": 2})),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let report = published(publisher.publish(&request("", "New Cat")).unwrap());

        assert!(report.category_ids.is_empty());
        assert_eq!(report.skipped_terms.len(), 1);
        let payload = client.transport().requests_to(Method::Post, "/posts")[0]
            .json_body()
            .unwrap();
        assert!(payload.get("categories").is_none());
        assert!(payload.get("tags").is_none());
    }

    #[test]
    fn test_numeric_category_used_directly() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new()).with_json(Method::Post, "/posts", 201, json!({})),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));

        let report = published(publisher.publish(&request("", " 42 ")).unwrap());

        assert_eq!(report.category_ids, vec![42]);
        assert!(client.transport().requests_to(Method::Get, "/categories").is_empty());
        let payload = client.transport().requests_to(Method::Post, "/posts")[0]
            .json_body()
            .unwrap();
        assert_eq!(payload["categories"], json!([42]));
    }

    #[test]
    fn test_embed_disabled_omits_image() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new()).with_json(Method::Post, "/posts", 201, json!({})),
        );
        let publisher = Publisher::new(&client, dir.path().join("out.png"));
        let mut request = request("", "");
        request.embed_image = false;

        assert!(publisher.publish(&request).unwrap().succeeded());

        let payload = client.transport().requests_to(Method::Post, "/posts")[0]
            .json_body()
            .unwrap();
        assert_eq!(payload["content"], json!("<div>B</div>"));
        assert_eq!(payload["featured_media"], json!(9));
    }

    #[test]
    fn test_bad_shape_raised_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(MockTransport::new());
        let publisher = Publisher::new(&client, dir.path().join("out.png"));
        let mut request = request("x", "");
        request.image = ImageTensor::new(vec![1, 2, 2, 4], vec![0.0; 16]).unwrap();

        let err = publisher.publish(&request).unwrap_err();

        assert!(matches!(err, ImageError::Shape { .. }));
        assert!(client.transport().requests().is_empty());
        assert!(!publisher.image_file().exists());
    }

    #[test]
    fn test_unwritable_bitmap_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(MockTransport::new());
        let publisher = Publisher::new(&client, dir.path().join("missing/dir/out.png"));

        let outcome = publisher.publish(&request("x", "")).unwrap();

        assert!(matches!(
            outcome,
            PublishOutcome::Failed(PublishError::Image { .. })
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_bitmap_written_and_uploaded() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new()).with_json(Method::Post, "/posts", 201, json!({})),
        );
        let publisher = Publisher::new(&client, dir.path().join("render.png"));

        assert!(publisher.publish(&request("", "")).unwrap().succeeded());

        assert!(publisher.image_file().exists());
        let upload = &client.transport().requests_to(Method::Post, "/media")[0];
        assert_eq!(
            upload.header_value("Content-Disposition"),
            Some("attachment; filename=\"render.png\"")
        );
        assert!(upload.body.windows(4).any(|w| w == b"\x89PNG"));
    }

    #[test]
    fn test_extensionless_bitmap_path_uploads_png() {
        let dir = tempfile::tempdir().unwrap();
        let client = mock_client(
            upload_ok(MockTransport::new()).with_json(Method::Post, "/posts", 201, json!({})),
        );
        let publisher = Publisher::new(&client, dir.path().join("comfyui_output"));

        assert!(publisher.publish(&request("", "")).unwrap().succeeded());

        let written = std::fs::read(publisher.image_file()).unwrap();
        assert!(written.starts_with(b"\x89PNG"));
        let upload = &client.transport().requests_to(Method::Post, "/media")[0];
        let body = String::from_utf8_lossy(&upload.body).into_owned();
        assert!(body.contains("Content-Type: image/png\r\n"));
    }
}
