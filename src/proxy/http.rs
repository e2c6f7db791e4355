//! HTTP Forwarder
//!
//! Plain-HTTP implementation of `Forwarder` on top of a shared `reqwest`
//! client. It relays method, end-to-end headers (`Host` included) and body to
//! the chosen backend and hands back whatever the backend answered. Redirects
//! are returned to the caller rather than followed.

use crate::error::ForwardError;
use crate::membership::types::Backend;

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::{self, HeaderName};

use super::forwarder::{ForwardRequest, ForwardResponse, Forwarder};

pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(
        &self,
        backend: &Backend,
        request: ForwardRequest,
    ) -> Result<ForwardResponse, ForwardError> {
        let url = format!("http://{}{}", backend, request.path_and_query());
        let mut headers = request.headers;
        // The client's Host is relayed as is; hyper only fills it in when absent.
        strip_connection_headers(&mut headers);

        tracing::trace!("{} {}", request.method, url);

        let response = self
            .client
            .request(request.method, url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| ForwardError::new(backend, e))?;

        let status = response.status();
        let mut headers = response.headers().clone();
        strip_connection_headers(&mut headers);

        let body = response
            .bytes()
            .await
            .map_err(|e| ForwardError::new(backend, e))?;

        Ok(ForwardResponse {
            status,
            headers,
            body,
        })
    }
}

/// Drops hop-by-hop headers, anything named in `Connection`, and the length,
/// which is recomputed from the buffered body.
fn strip_connection_headers(headers: &mut HeaderMap) {
    let named: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in named {
        headers.remove(&name);
    }
    for name in [
        header::CONNECTION,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
        header::TE,
        header::TRAILER,
        header::TRANSFER_ENCODING,
        header::UPGRADE,
    ] {
        headers.remove(&name);
    }
    headers.remove("keep-alive");
    headers.remove(header::CONTENT_LENGTH);
}
