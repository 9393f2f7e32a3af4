//! In-memory latency histogram for the price-check pipeline.
//! Records end-to-end check-price handling time so an external load-test
//! harness can read aggregate figures instead of deriving them client-side.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

/// Shared latency stats. The check-price handler records, the stats
/// endpoint reads. Values stored in microseconds.
pub struct LatencyStats {
    inner: Mutex<hdrhistogram::Histogram<u64>>,
}

/// Read-side view in milliseconds, shaped for the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LatencySnapshot {
    pub samples: u64,
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
}

impl LatencyStats {
    /// Tracks 1us to 100s, 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 100_000_000, 3)
            .expect("valid histogram bounds");
        Self {
            inner: Mutex::new(histogram),
        }
    }

    /// Record one request's handling time.
    pub fn record(&self, d: Duration) {
        let us = d.as_micros().min(u128::from(u64::MAX)) as u64;
        if let Ok(mut h) = self.inner.lock() {
            let _ = h.record(us.max(1));
        }
    }

    pub fn snapshot(&self) -> LatencySnapshot {
        let Ok(h) = self.inner.lock() else {
            return LatencySnapshot {
                samples: 0,
                p50_ms: None,
                p95_ms: None,
                p99_ms: None,
            };
        };
        if h.len() == 0 {
            return LatencySnapshot {
                samples: 0,
                p50_ms: None,
                p95_ms: None,
                p99_ms: None,
            };
        }
        let to_ms = |us: u64| us as f64 / 1000.0;
        LatencySnapshot {
            samples: h.len(),
            p50_ms: Some(to_ms(h.value_at_quantile(0.5))),
            p95_ms: Some(to_ms(h.value_at_quantile(0.95))),
            p99_ms: Some(to_ms(h.value_at_quantile(0.99))),
        }
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}
