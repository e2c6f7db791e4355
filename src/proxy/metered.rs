use crate::error::ForwardError;
use crate::membership::types::Backend;
use crate::metrics::ProxyMetrics;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use super::forwarder::{ForwardRequest, ForwardResponse, Forwarder};

/// Wraps a forwarder with request counting, latency timing and hit/miss
/// classification. It is itself a `Forwarder`, so it drops in wherever the
/// inner one would be used.
pub struct MeteredForwarder<F> {
    inner: F,
    metrics: Arc<ProxyMetrics>,
}

impl<F: Forwarder> MeteredForwarder<F> {
    pub fn new(inner: F, metrics: Arc<ProxyMetrics>) -> Self {
        Self { inner, metrics }
    }

    pub fn metrics(&self) -> &Arc<ProxyMetrics> {
        &self.metrics
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: Forwarder> Forwarder for MeteredForwarder<F> {
    async fn forward(
        &self,
        backend: &Backend,
        request: ForwardRequest,
    ) -> Result<ForwardResponse, ForwardError> {
        self.metrics.requests.mark();

        let started = Instant::now();
        let result = self.inner.forward(backend, request).await;
        // Failed attempts still cost time.
        self.metrics.backend_latency.record(started.elapsed());

        match &result {
            Ok(response) if response.is_cache_hit() => self.metrics.hits.mark(),
            Ok(_) => self.metrics.misses.mark(),
            Err(e) => {
                tracing::debug!("Counting failed dispatch to {} as a miss: {}", backend, e);
                self.metrics.misses.mark();
            }
        }

        result
    }
}
