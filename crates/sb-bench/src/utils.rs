//! Benchmark utilities

use std::time::{Duration, Instant};

/// Throughput metrics for signal processing
#[derive(Debug, Clone, serde::Serialize)]
pub struct ThroughputMetrics {
    /// Samples processed per microsecond
    pub samples_per_us: f64,
    /// Time per sample in nanoseconds
    pub ns_per_sample: f64,
}

impl ThroughputMetrics {
    /// Calculate metrics from a measured duration
    pub fn from_duration(samples: usize, duration: Duration) -> Self {
        let us = duration.as_secs_f64() * 1_000_000.0;
        let samples_per_us = if us > 0.0 { samples as f64 / us } else { f64::INFINITY };
        let ns_per_sample = if samples > 0 {
            duration.as_nanos() as f64 / samples as f64
        } else {
            0.0
        };

        Self {
            samples_per_us,
            ns_per_sample,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{:.1} samples/us ({:.2}ns/sample)",
            self.samples_per_us, self.ns_per_sample
        )
    }
}

/// Simple benchmark runner for quick measurements
pub struct QuickBench {
    iterations: usize,
    warmup: usize,
}

impl QuickBench {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations: iterations.max(1),
            warmup: 10,
        }
    }

    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run benchmark and return average duration
    pub fn run<F>(&self, mut f: F) -> Duration
    where
        F: FnMut(),
    {
        for _ in 0..self.warmup {
            f();
        }

        let start = Instant::now();
        for _ in 0..self.iterations {
            f();
        }
        start.elapsed() / self.iterations as u32
    }

    /// Average a per-call duration reported by `f` itself
    pub fn run_timed<F>(&self, mut f: F) -> Duration
    where
        F: FnMut() -> Duration,
    {
        for _ in 0..self.warmup {
            f();
        }

        let total: Duration = (0..self.iterations).map(|_| f()).sum();
        total / self.iterations as u32
    }
}

/// Ratio of baseline to measured time (>1.0 means measured is faster)
pub fn speedup(baseline: Duration, measured: Duration) -> f64 {
    if measured.is_zero() {
        return f64::INFINITY;
    }
    baseline.as_secs_f64() / measured.as_secs_f64()
}
