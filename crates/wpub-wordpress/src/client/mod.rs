//! WordPress REST API client.
//!
//! Provides a sync HTTP client for the `wp/v2` REST API with basic
//! authentication (usually a WordPress application password).

mod media;
mod posts;
mod taxonomy;

use wpub_config::Credentials;

use crate::auth::BasicAuth;
use crate::error::WordPressError;
use crate::transport::{HttpRequest, HttpResponse, Transport, UreqTransport};

/// WordPress REST API client.
pub struct WordPressClient<T = UreqTransport> {
    transport: T,
    base_url: String,
    auth: BasicAuth,
}

impl WordPressClient<UreqTransport> {
    /// Create a client using the blocking `ureq` transport.
    ///
    /// # Arguments
    /// * `site_url` - WordPress site base URL (trailing slashes are ignored)
    /// * `credentials` - Basic-auth user and password
    #[must_use]
    pub fn from_config(site_url: &str, credentials: &Credentials) -> Self {
        Self::with_transport(UreqTransport::new(), site_url, credentials)
    }
}

impl<T: Transport> WordPressClient<T> {
    /// Create a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: T, site_url: &str, credentials: &Credentials) -> Self {
        Self {
            transport,
            base_url: site_url.trim_end_matches('/').to_owned(),
            auth: BasicAuth::new(credentials),
        }
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/wp-json/wp/v2", self.base_url)
    }

    /// Authenticate and send a request.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, WordPressError> {
        let request = request
            .header("Authorization", self.auth.header_value())
            .header("Accept", "application/json");
        self.transport.send(&request)
    }
}
