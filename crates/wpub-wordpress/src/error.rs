//! Error types for WordPress integration.

/// Error from WordPress REST API operations.
#[derive(Debug, thiserror::Error)]
pub enum WordPressError {
    /// HTTP request failed (network error, TLS, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned an unexpected status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Successful status, but the response lacks a required field.
    #[error("response missing '{field}': {body}")]
    MissingField {
        /// Name of the missing JSON field.
        field: &'static str,
        /// Response body for diagnostics.
        body: String,
    },

    /// An all-digit term ID that does not fit the ID type.
    #[error("invalid term ID '{value}': {source}")]
    InvalidId {
        /// ID as given.
        value: String,
        /// Parse failure.
        source: std::num::ParseIntError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error converting an in-memory pixel buffer into a bitmap file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImageError {
    /// Buffer does not normalize to `[height, width, 3]`.
    #[error("Unexpected shape after squeezing: {shape:?}")]
    Shape {
        /// Shape of the offending buffer.
        shape: Vec<usize>,
    },

    /// Number of values does not match the declared shape.
    #[error("pixel data has {actual} values but shape {shape:?} needs {expected}")]
    DataLength {
        /// Declared shape.
        shape: Vec<usize>,
        /// Values required by the shape.
        expected: usize,
        /// Values supplied.
        actual: usize,
    },

    /// Encoding or writing the bitmap failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
