use crate::error::{Error, Result};
use crate::membership::types::join_backends;
use crate::routing::Router;
use crate::routing::protocol::{HEADER_BACKENDS, HEADER_FORWARDED_FOR};

use axum::Extension;
use axum::body::to_bytes;
use axum::extract::{ConnectInfo, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http_body_util::LengthLimitError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use super::forwarder::{ForwardRequest, ForwardResponse, Forwarder};
use super::metered::MeteredForwarder;

/// Largest request body buffered for forwarding.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// The proxy's data plane: pick a backend, hand the request to it.
pub struct CacheProxy<F> {
    router: Router,
    forwarder: MeteredForwarder<F>,
}

impl<F: Forwarder> CacheProxy<F> {
    pub fn new(router: Router, forwarder: MeteredForwarder<F>) -> Arc<Self> {
        Arc::new(Self { router, forwarder })
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn forwarder(&self) -> &MeteredForwarder<F> {
        &self.forwarder
    }

    /// Routes `request`, rewrites `X-Backends` to this hop's alternates and
    /// forwards it to the primary.
    pub async fn dispatch(&self, mut request: ForwardRequest) -> Result<ForwardResponse> {
        let preset = request
            .headers
            .get(HEADER_BACKENDS)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let selection = self.router.route(request.routing_key(), preset.as_deref())?;

        request.headers.remove(HEADER_BACKENDS);
        if !selection.alternates.is_empty() {
            match HeaderValue::from_str(&join_backends(&selection.alternates)) {
                Ok(value) => {
                    request.headers.insert(HEADER_BACKENDS, value);
                }
                Err(e) => {
                    tracing::warn!(
                        "Alternates for {} are not a valid header: {}",
                        selection.primary,
                        e
                    );
                }
            }
        }

        let response = self.forwarder.forward(&selection.primary, request).await?;

        Ok(response)
    }
}

pub async fn handle_proxy<F>(
    Extension(proxy): Extension<Arc<CacheProxy<F>>>,
    request: Request,
) -> Response
where
    F: Forwarder + 'static,
{
    let (mut parts, body) = request.into_parts();

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) if is_length_limit(&e) => {
            tracing::warn!("Request body for {} exceeds {} bytes", parts.uri, MAX_BODY_BYTES);
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large\n").into_response();
        }
        Err(e) => {
            tracing::warn!("Failed to read request body for {}: {}", parts.uri, e);
            return (StatusCode::BAD_REQUEST, "unreadable request body\n").into_response();
        }
    };

    let client = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.ip());
    if let Some(client) = client {
        append_forwarded_for(&mut parts.headers, client);
    }

    let request = ForwardRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    };

    match proxy.dispatch(request).await {
        Ok(response) => response.into_response(),
        Err(Error::EmptyRing) => {
            tracing::warn!("No cache backends registered");
            (StatusCode::SERVICE_UNAVAILABLE, "no cache backends available\n").into_response()
        }
        Err(Error::Forward(e)) => {
            tracing::warn!("{}", e);
            (StatusCode::BAD_GATEWAY, "cache backend unavailable\n").into_response()
        }
    }
}

/// Adds `client` to `X-Forwarded-For`, after any hops already listed.
pub fn append_forwarded_for(headers: &mut HeaderMap, client: IpAddr) {
    let prior: Vec<&str> = headers
        .get_all(HEADER_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    let value = if prior.is_empty() {
        client.to_string()
    } else {
        format!("{}, {}", prior.join(", "), client)
    };

    match HeaderValue::from_str(&value) {
        Ok(value) => {
            headers.insert(HEADER_FORWARDED_FOR, value);
        }
        Err(e) => tracing::warn!("Dropping unusable X-Forwarded-For {:?}: {}", value, e),
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

/// The proxy listener's app: every path and method goes through the router.
pub fn app<F>(proxy: Arc<CacheProxy<F>>) -> axum::Router
where
    F: Forwarder + 'static,
{
    axum::Router::new()
        .fallback(handle_proxy::<F>)
        .layer(Extension(proxy))
}
