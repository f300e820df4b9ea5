//! Media operations for WordPress API.

use std::path::Path;

use image::ImageFormat;
use rand::RngExt;
use tracing::info;

use super::WordPressClient;
use crate::error::WordPressError;
use crate::transport::{HttpRequest, Transport};
use crate::types::{MediaAsset, MediaResponse};

impl<T: Transport> WordPressClient<T> {
    /// Upload a local file to the media library.
    ///
    /// The attachment is named after the file; its content type is derived
    /// from the extension.
    pub fn upload_media(&self, path: &Path) -> Result<MediaAsset, WordPressError> {
        let content_type = ImageFormat::from_path(path)
            .map_or("application/octet-stream", |format| format.to_mime_type());
        self.upload_media_as(path, content_type)
    }

    /// Upload a local file to the media library with an explicit content type.
    pub fn upload_media_as(
        &self,
        path: &Path,
        content_type: &str,
    ) -> Result<MediaAsset, WordPressError> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.png");

        self.upload_media_bytes(filename, &data, content_type)
    }

    /// Upload in-memory file contents to the media library.
    ///
    /// Succeeds on any 2xx response whose body carries a non-empty
    /// `source_url` and an `id`.
    pub fn upload_media_bytes(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<MediaAsset, WordPressError> {
        let url = format!("{}/media", self.api_url());

        info!("Uploading media '{}' ({} bytes)", filename, data.len());

        // Build multipart form data manually
        let boundary = format!("----WpubFormBoundary{:016x}", rand::rng().random::<u64>());
        let mut body = Vec::new();

        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let request = HttpRequest::post(url, body)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            );

        let response = self.send(request)?;
        if !response.is_success() {
            return Err(response.into_error());
        }

        let parsed: Option<MediaResponse> = response.json().ok();
        let (source_url, id) = parsed.map_or((None, None), |m| (m.source_url, m.id));

        let Some(url) = source_url.filter(|u| !u.is_empty()) else {
            return Err(WordPressError::MissingField {
                field: "source_url",
                body: response.text(),
            });
        };
        let Some(id) = id else {
            return Err(WordPressError::MissingField {
                field: "id",
                body: response.text(),
            });
        };

        info!("Uploaded media URL: {} | ID: {}", url, id);
        Ok(MediaAsset { url, id })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::client::tests::mock_client;
    use crate::error::WordPressError;
    use crate::mock::MockTransport;
    use crate::transport::Method;
    use crate::types::MediaAsset;

    #[test]
    fn test_upload_success() {
        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": 9, "source_url": "http://h/i.png", "media_type": "image"}),
        ));

        let media = client
            .upload_media_bytes("out.png", b"PNGDATA", "image/png")
            .unwrap();

        assert_eq!(
            media,
            MediaAsset {
                url: "http://h/i.png".to_owned(),
                id: 9
            }
        );

        let request = &client.transport().requests_to(Method::Post, "/media")[0];
        assert_eq!(request.url, "http://h/wp-json/wp/v2/media");
        assert_eq!(
            request.header_value("Content-Disposition"),
            Some("attachment; filename=\"out.png\"")
        );
        let content_type = request.header_value("Content-Type").unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"file\"; filename=\"out.png\""));
        assert!(body.contains("Content-Type: image/png\r\n\r\nPNGDATA\r\n"));
    }

    #[test]
    fn test_upload_accepts_200() {
        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            200,
            json!({"id": 0, "source_url": "http://h/zero.png"}),
        ));

        let media = client.upload_media_bytes("a.png", b"x", "image/png").unwrap();
        assert_eq!(media.id, 0);
    }

    #[test]
    fn test_upload_server_error_carries_body() {
        let client = mock_client(MockTransport::new().with_response(
            Method::Post,
            "/media",
            500,
            "upload_dir not writable",
        ));

        let err = client
            .upload_media_bytes("a.png", b"x", "image/png")
            .unwrap_err();
        match err {
            WordPressError::HttpResponse { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upload_dir not writable");
            }
            other => panic!("Expected HttpResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_missing_source_url() {
        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": 9, "source_url": ""}),
        ));

        let err = client
            .upload_media_bytes("a.png", b"x", "image/png")
            .unwrap_err();
        assert!(matches!(
            err,
            WordPressError::MissingField {
                field: "source_url",
                ..
            }
        ));
    }

    #[test]
    fn test_upload_null_id() {
        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": null, "source_url": "http://h/i.png"}),
        ));

        let err = client
            .upload_media_bytes("a.png", b"x", "image/png")
            .unwrap_err();
        assert!(matches!(err, WordPressError::MissingField { field: "id", .. }));
    }

    #[test]
    fn test_upload_media_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.png");
        std::fs::write(&path, b"PNG").unwrap();

        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": 5, "source_url": "http://h/render.png"}),
        ));

        let media = client.upload_media(&path).unwrap();
        assert_eq!(media.id, 5);

        let request = &client.transport().requests()[0];
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("filename=\"render.png\""));
        assert!(body.contains("Content-Type: image/png"));
    }

    #[test]
    fn test_upload_media_as_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comfyui_output");
        std::fs::write(&path, b"PNG").unwrap();

        let client = mock_client(MockTransport::new().with_json(
            Method::Post,
            "/media",
            201,
            json!({"id": 6, "source_url": "http://h/comfyui_output"}),
        ));

        client.upload_media_as(&path, "image/png").unwrap();

        let body = String::from_utf8_lossy(&client.transport().requests()[0].body).into_owned();
        assert!(body.contains("filename=\"comfyui_output\""));
        assert!(body.contains("Content-Type: image/png\r\n"));
    }

    #[test]
    fn test_upload_media_missing_file() {
        let client = mock_client(MockTransport::new());
        let err = client
            .upload_media(std::path::Path::new("/nonexistent/file.png"))
            .unwrap_err();
        assert!(matches!(err, WordPressError::Io(_)));
        assert!(client.transport().requests().is_empty());
    }
}
