//! Timing instrumentation
//!
//! Brackets a transform with monotonic `Instant` timestamps. Each
//! measurement replaces the previous one; there is no history.

use std::time::{Duration, Instant};

/// Sentinel returned by microsecond queries before any transform has run
pub const NO_PROCESSING_TIME_US: f64 = -1.0;

/// Elapsed time of one transform invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimingRecord {
    elapsed: Duration,
}

impl TimingRecord {
    pub fn new(elapsed: Duration) -> Self {
        Self { elapsed }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in microseconds, sub-microsecond fraction kept
    #[inline]
    pub fn as_micros_f64(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000_000.0
    }
}

/// Time a closure without touching any shared state
#[inline]
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, TimingRecord) {
    let start = Instant::now();
    let value = f();
    (value, TimingRecord::new(start.elapsed()))
}

/// Single-slot timer holding the most recent measurement
#[derive(Debug, Clone, Default)]
pub struct ProcessingTimer {
    last: Option<TimingRecord>,
}

impl ProcessingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, store its duration as the latest record and return both
    pub fn measure<T>(&mut self, f: impl FnOnce() -> T) -> (T, TimingRecord) {
        let (value, record) = measure(f);
        self.last = Some(record);
        (value, record)
    }

    /// Latest record, `None` before the first measurement
    #[inline]
    pub fn last(&self) -> Option<TimingRecord> {
        self.last
    }

    /// Latest duration in microseconds, `NO_PROCESSING_TIME_US` before the first measurement
    #[inline]
    pub fn last_us(&self) -> f64 {
        self.last
            .map_or(NO_PROCESSING_TIME_US, |record| record.as_micros_f64())
    }
}
