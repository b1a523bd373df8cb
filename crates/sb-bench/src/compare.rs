//! Scalar vs vector path comparison
//!
//! Runs both engines through the processing facade on the same generated
//! signal, checks the outputs are identical and averages their timings.

use std::time::Duration;

use sb_core::{EngineKind, SbError, SbResult, TransformOp};
use sb_dsp::SignalProcessor;
use serde::Serialize;

use crate::utils::{speedup, QuickBench, ThroughputMetrics};

/// Timing comparison of one transform on both paths
#[derive(Debug, Clone, Serialize)]
pub struct PathComparison {
    pub op: TransformOp,
    pub signal_length: usize,
    /// SIMD level of the vector path
    pub simd_level: String,
    pub iterations: usize,
    pub scalar_us: f64,
    pub vector_us: f64,
    /// scalar / vector (>1.0 means the vector path is faster)
    pub speedup: f64,
    pub scalar_throughput: ThroughputMetrics,
    pub vector_throughput: ThroughputMetrics,
}

impl PathComparison {
    pub fn summary(&self) -> String {
        format!(
            "{} [{} samples, {}]: scalar {:.2}us, vector {:.2}us, {:.2}x",
            self.op,
            self.signal_length,
            self.simd_level,
            self.scalar_us,
            self.vector_us,
            self.speedup
        )
    }
}

/// Compare scalar and vector paths for `op`
///
/// Fails with `SimdUnsupported` when the processor has no vector path and
/// with `PathMismatch` if the two engines disagree on any sample.
pub fn compare_paths(
    processor: &mut SignalProcessor,
    op: TransformOp,
    iterations: usize,
) -> SbResult<PathComparison> {
    let signal = processor.generate_signal();

    let scalar = processor.run(op, &signal, EngineKind::Scalar)?;
    let vector = processor.run(op, &signal, EngineKind::Vector)?;
    if let Some(index) = scalar.signal.first_difference(&vector.signal) {
        return Err(SbError::PathMismatch {
            op: op.to_string(),
            index,
        });
    }

    let bench = QuickBench::new(iterations);
    let mut time_path = |kind: EngineKind| -> SbResult<Duration> {
        let mut failure = None;
        let avg = bench.run_timed(|| match processor.run(op, &signal, kind) {
            Ok(result) => result.timing.elapsed(),
            Err(e) => {
                failure = Some(e);
                Duration::ZERO
            }
        });
        failure.map_or(Ok(avg), Err)
    };
    let scalar_time = time_path(EngineKind::Scalar)?;
    let vector_time = time_path(EngineKind::Vector)?;

    let comparison = PathComparison {
        op,
        signal_length: signal.len(),
        simd_level: processor.simd_level().name().to_string(),
        iterations: bench.iterations(),
        scalar_us: scalar_time.as_secs_f64() * 1_000_000.0,
        vector_us: vector_time.as_secs_f64() * 1_000_000.0,
        speedup: speedup(scalar_time, vector_time),
        scalar_throughput: ThroughputMetrics::from_duration(signal.len(), scalar_time),
        vector_throughput: ThroughputMetrics::from_duration(signal.len(), vector_time),
    };
    log::debug!("{}", comparison.summary());

    Ok(comparison)
}

/// Compare every transform
pub fn compare_all(
    processor: &mut SignalProcessor,
    iterations: usize,
) -> SbResult<Vec<PathComparison>> {
    TransformOp::ALL
        .into_iter()
        .map(|op| compare_paths(processor, op, iterations))
        .collect()
}
