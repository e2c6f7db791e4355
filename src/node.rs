//! Demo Cache Node
//!
//! A stand-in cache backend for local clusters and end-to-end tests. It
//! answers every request with an `X-Cache` verdict drawn at random and echoes
//! the `X-Backends` header it received, which makes the router's alternate
//! rewriting visible from the outside.

use crate::routing::protocol::{CACHE_HIT, HEADER_BACKENDS, HEADER_CACHE};

use axum::Extension;
use axum::http::{HeaderMap, StatusCode};
use rand::Rng;
use std::sync::Arc;

pub const CACHE_MISS: &str = "MISS";

/// Fraction of requests answered with `X-Cache: HIT`.
#[derive(Debug, Clone, Copy)]
pub struct HitRatio(f64);

impl HitRatio {
    pub fn new(ratio: f64) -> Self {
        Self(if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) })
    }

    pub fn always_hit() -> Self {
        Self(1.0)
    }

    pub fn always_miss() -> Self {
        Self(0.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

pub async fn handle_cache_request(
    Extension(ratio): Extension<Arc<HitRatio>>,
    headers: HeaderMap,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    let verdict = if rand::thread_rng().gen_bool(ratio.value()) {
        CACHE_HIT
    } else {
        CACHE_MISS
    };

    let backends = headers
        .get(HEADER_BACKENDS)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    tracing::debug!("Answering {} (x-backends: {:?})", verdict, backends);

    (
        StatusCode::OK,
        [(HEADER_CACHE, verdict)],
        format!("{}\n", backends),
    )
}

pub fn app(ratio: HitRatio) -> axum::Router {
    axum::Router::new()
        .fallback(handle_cache_request)
        .layer(Extension(Arc::new(ratio)))
}
