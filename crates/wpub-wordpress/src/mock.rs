//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for exercising the publish pipeline without
//! a WordPress server.

use std::io;
use std::sync::RwLock;

use crate::error::WordPressError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Scripted reply for one request.
#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    ConnectionError,
}

#[derive(Debug)]
struct Route {
    method: Method,
    endpoint: String,
    reply: Reply,
    used: bool,
}

impl Route {
    fn matches(&self, request: &HttpRequest) -> bool {
        !self.used && self.method == request.method && request.path().ends_with(&self.endpoint)
    }
}

/// Mock transport for testing.
///
/// Replies are one-shot and matched in registration order by method and
/// endpoint suffix (the URL path without query string, e.g. `"/tags"`).
/// Requests without a scripted reply get a `404`. Every request is recorded.
///
/// # Example
///
/// ```ignore
/// use wpub_wordpress::{Method, MockTransport};
///
/// let transport = MockTransport::new()
///     .with_json(Method::Get, "/tags", 200, serde_json::json!([]))
///     .with_json(Method::Post, "/tags", 201, serde_json::json!({"id": 3}));
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: RwLock<Vec<Route>>,
    requests: RwLock<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a mock with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a raw response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_response(
        self,
        method: Method,
        endpoint: impl Into<String>,
        status: u16,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.push(method, endpoint.into(), Reply::Response(HttpResponse::new(status, body)));
        self
    }

    /// Script a JSON response.
    #[must_use]
    pub fn with_json(
        self,
        method: Method,
        endpoint: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> Self {
        self.with_response(method, endpoint, status, body.to_string())
    }

    /// Script a connection failure.
    #[must_use]
    pub fn with_connection_error(self, method: Method, endpoint: impl Into<String>) -> Self {
        self.push(method, endpoint.into(), Reply::ConnectionError);
        self
    }

    fn push(&self, method: Method, endpoint: String, reply: Reply) {
        self.routes.write().unwrap().push(Route {
            method,
            endpoint,
            reply,
            used: false,
        });
    }

    /// All requests sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Requests sent with `method` to an endpoint ending in `endpoint`.
    pub fn requests_to(&self, method: Method, endpoint: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path().ends_with(endpoint))
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, WordPressError> {
        self.requests.write().unwrap().push(request.clone());

        let mut routes = self.routes.write().unwrap();
        let Some(route) = routes.iter_mut().find(|r| r.matches(request)) else {
            return Ok(HttpResponse::new(
                404,
                format!("no mock reply for {} {}", request.method, request.url),
            ));
        };
        route.used = true;

        match &route.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::ConnectionError => Err(WordPressError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
