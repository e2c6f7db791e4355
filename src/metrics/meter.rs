use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// A monotonically increasing event count.
#[derive(Debug)]
pub struct Meter {
    name: &'static str,
    count: AtomicU64,
}

impl Meter {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            count: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Records one event.
    pub fn mark(&self) {
        self.mark_n(1);
    }

    pub fn mark_n(&self, n: u64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Reads the count along with its average rate over `elapsed`.
    pub fn snapshot(&self, elapsed: Duration) -> MeterSnapshot {
        let count = self.count();
        let secs = elapsed.as_secs_f64();
        let mean_rate = if secs > 0.0 { count as f64 / secs } else { 0.0 };

        MeterSnapshot { count, mean_rate }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeterSnapshot {
    pub count: u64,
    /// Events per second since the meter was created.
    pub mean_rate: f64,
}
