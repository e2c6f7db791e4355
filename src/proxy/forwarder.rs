use crate::error::ForwardError;
use crate::membership::types::Backend;
use crate::routing::protocol::{CACHE_HIT, HEADER_CACHE};

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

/// A request on its way to a backend, with the body already buffered.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// The hash input for ring lookups: the path without the query string.
    pub fn routing_key(&self) -> &str {
        self.uri.path()
    }

    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
    }
}

/// What came back from a backend.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// The backend's `X-Cache` value, if present and readable.
    pub fn cache_status(&self) -> Option<&str> {
        self.headers
            .get(HEADER_CACHE)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
    }

    /// Anything other than an exact `HIT` is a miss, including no header at all.
    pub fn is_cache_hit(&self) -> bool {
        self.cache_status() == Some(CACHE_HIT)
    }
}

impl IntoResponse for ForwardResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

/// Sends one request to one backend.
///
/// Implementations own the transport; callers only pick the backend.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(
        &self,
        backend: &Backend,
        request: ForwardRequest,
    ) -> Result<ForwardResponse, ForwardError>;
}
