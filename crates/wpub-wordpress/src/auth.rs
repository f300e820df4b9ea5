//! HTTP basic authentication for the WordPress REST API.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use wpub_config::Credentials;

/// Precomputed `Authorization` header value (internal use only).
pub(crate) struct BasicAuth {
    header: String,
}

impl BasicAuth {
    /// Build the header from a user/password pair.
    pub(crate) fn new(credentials: &Credentials) -> Self {
        let token = BASE64_STANDARD.encode(format!("{}:{}", credentials.user, credentials.pass));
        Self {
            header: format!("Basic {token}"),
        }
    }

    /// Value for the `Authorization` header.
    pub(crate) fn header_value(&self) -> &str {
        &self.header
    }
}
