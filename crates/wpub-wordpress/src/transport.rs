//! HTTP transport abstraction.
//!
//! [`WordPressClient`](crate::WordPressClient) issues every request through
//! the [`Transport`] trait so the pipeline can run against a scripted
//! backend in tests. [`UreqTransport`] is the production implementation.

use std::fmt;

use serde::de::DeserializeOwned;
use ureq::{Agent, RequestBuilder};

use crate::error::WordPressError;

/// HTTP method used by the WordPress API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET` (term search).
    Get,
    /// `POST` (media upload, term and post creation).
    Post,
}

impl Method {
    /// Method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL including query string.
    pub url: String,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body (empty for `GET`).
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a `GET` request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Create a `POST` request with the given body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive name match).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    /// Parse the body as JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP response with the body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8 (lossy), for diagnostics.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Convert into an error carrying status and body.
    pub fn into_error(self) -> WordPressError {
        WordPressError::HttpResponse {
            status: self.status,
            body: self.text(),
        }
    }
}

/// Sends HTTP requests.
///
/// Implementations must return non-2xx responses as `Ok`; status handling
/// belongs to the caller.
pub trait Transport {
    /// Send a request and read the whole response.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, WordPressError>;
}

/// Blocking transport backed by a [`ureq::Agent`].
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport that reports every HTTP status as a response.
    ///
    /// No timeout is configured; the agent defaults apply.
    #[must_use]
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_headers<B>(mut builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, WordPressError> {
        let response = match request.method {
            Method::Get => apply_headers(self.agent.get(&request.url), request).call()?,
            Method::Post => {
                apply_headers(self.agent.post(&request.url), request).send(&request.body[..])?
            }
        };

        let status = response.status().as_u16();
        let body = response.into_body().read_to_vec()?;

        Ok(HttpResponse { status, body })
    }
}
