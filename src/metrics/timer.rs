use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Upper bounds (milliseconds) of the cumulative latency buckets.
pub const LATENCY_BUCKETS_MS: &[f64] = &[
    1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0,
];

/// Records durations. Every field is an independent atomic, so concurrent
/// recorders never block each other.
#[derive(Debug)]
pub struct Timer {
    name: &'static str,
    count: AtomicU64,
    total_nanos: AtomicU64,
    min_nanos: AtomicU64,
    max_nanos: AtomicU64,
    bucket_counts: Vec<AtomicU64>,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            min_nanos: AtomicU64::new(u64::MAX),
            max_nanos: AtomicU64::new(0),
            bucket_counts: LATENCY_BUCKETS_MS.iter().map(|_| AtomicU64::new(0)).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn record(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);

        self.min_nanos.fetch_min(nanos, Ordering::Relaxed);
        self.max_nanos.fetch_max(nanos, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
        // Published last: a reader that sees the count also sees min/max.
        self.count.fetch_add(1, Ordering::Release);

        let millis = elapsed.as_secs_f64() * 1000.0;
        for (i, &upper) in LATENCY_BUCKETS_MS.iter().enumerate() {
            if millis <= upper {
                self.bucket_counts[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Runs `f` and records how long it took.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = f();
        self.record(started.elapsed());
        result
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let count = self.count();
        let total_nanos = self.total_nanos.load(Ordering::Relaxed);
        let min_nanos = self.min_nanos.load(Ordering::Relaxed);
        let (min_ms, max_ms, mean_ms) = if count == 0 || min_nanos == u64::MAX {
            (0.0, 0.0, 0.0)
        } else {
            (
                nanos_to_ms(min_nanos),
                nanos_to_ms(self.max_nanos.load(Ordering::Relaxed)),
                nanos_to_ms(total_nanos) / count as f64,
            )
        };

        let buckets = LATENCY_BUCKETS_MS
            .iter()
            .zip(&self.bucket_counts)
            .map(|(&le_ms, counter)| BucketCount {
                le_ms,
                count: counter.load(Ordering::Relaxed),
            })
            .collect();

        TimerSnapshot {
            count,
            min_ms,
            max_ms,
            mean_ms,
            total_ms: nanos_to_ms(total_nanos),
            buckets,
        }
    }
}

fn nanos_to_ms(nanos: u64) -> f64 {
    nanos as f64 / 1_000_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketCount {
    pub le_ms: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub count: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub total_ms: f64,
    /// Cumulative: each bucket counts every sample at or below `le_ms`.
    pub buckets: Vec<BucketCount>,
}
