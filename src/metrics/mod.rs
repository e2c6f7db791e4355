//! Proxy Metrics
//!
//! Counters and a latency timer describing traffic sent to cache backends.
//! `MeteredForwarder` is the only writer; the management surface reads
//! point-in-time snapshots. Nothing is ever reset while the process runs.

pub mod meter;
pub mod timer;

pub use meter::{Meter, MeterSnapshot};
pub use timer::{BucketCount, LATENCY_BUCKETS_MS, Timer, TimerSnapshot};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const METRIC_REQUESTS: &str = "requests";
pub const METRIC_HITS: &str = "hits";
pub const METRIC_MISSES: &str = "misses";
pub const METRIC_BACKEND_LATENCY: &str = "backend-latency";

#[derive(Debug)]
pub struct ProxyMetrics {
    pub requests: Meter,
    pub hits: Meter,
    pub misses: Meter,
    pub backend_latency: Timer,
    started: Instant,
}

impl ProxyMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let elapsed = self.started.elapsed();

        MetricsSnapshot {
            uptime_secs: elapsed.as_secs_f64(),
            requests: self.requests.snapshot(elapsed),
            hits: self.hits.snapshot(elapsed),
            misses: self.misses.snapshot(elapsed),
            backend_latency: self.backend_latency.snapshot(),
        }
    }
}

impl Default for ProxyMetrics {
    fn default() -> Self {
        Self {
            requests: Meter::new(METRIC_REQUESTS),
            hits: Meter::new(METRIC_HITS),
            misses: Meter::new(METRIC_MISSES),
            backend_latency: Timer::new(METRIC_BACKEND_LATENCY),
            started: Instant::now(),
        }
    }
}

/// One-shot dump served at `GET /metrics/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: f64,
    pub requests: MeterSnapshot,
    pub hits: MeterSnapshot,
    pub misses: MeterSnapshot,
    #[serde(rename = "backend-latency")]
    pub backend_latency: TimerSnapshot,
}
