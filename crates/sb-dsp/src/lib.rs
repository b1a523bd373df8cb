//! sb-dsp: Dual-path signal transforms for SignalBench
//!
//! Generates a deterministic 8-bit test signal and runs truncate and
//! convolution either on scalar reference code or on SIMD kernels, timing
//! each call so both paths can be compared on identical data.
//!
//! ## Modules
//! - `generator` - Seeded sine + noise signal generator
//! - `scalar` - Reference truncate and convolution
//! - `simd` - SIMD level detection and AVX2 / SSE4.1 / NEON kernels
//! - `vector` - Transform engine over the SIMD dispatch table
//! - `timing` - Monotonic timing of single transforms
//! - `processor` - Facade selecting the engine per call
//!
//! The NEON kernels only build on aarch64; running `tests/path_equivalence.rs`
//! there checks them against the scalar path.

pub mod generator;
pub mod processor;
pub mod scalar;
pub mod simd;
pub mod timing;
pub mod vector;

pub use generator::{generate_constant, generate_impulse, SignalGenerator};
pub use processor::{SignalProcessor, TransformResult};
pub use scalar::ScalarEngine;
pub use simd::{detect_simd_level, SimdLevel};
pub use timing::{ProcessingTimer, TimingRecord, NO_PROCESSING_TIME_US};
pub use vector::VectorEngine;

use sb_core::{EngineKind, Sample, SbError, SbResult, Signal, TransformOp};

/// Trait for the truncate/convolution engines
///
/// Implementations must agree byte-for-byte; they differ only in speed.
pub trait TransformEngine: Send + Sync {
    /// Which path this engine implements
    fn kind(&self) -> EngineKind;

    /// Human-readable engine name
    fn name(&self) -> &'static str;

    /// Clamp every sample of `input` into `output` (equal lengths)
    fn truncate_samples(&self, input: &[Sample], output: &mut [Sample]);

    /// Convolve `input` into `output` (equal lengths, zero padded)
    fn convolve_samples(&self, input: &[Sample], output: &mut [Sample]);

    /// Run `op` from `input` into a caller-owned buffer of the same length
    fn apply_into(
        &self,
        op: TransformOp,
        input: &[Sample],
        output: &mut [Sample],
    ) -> SbResult<()> {
        if input.len() != output.len() {
            return Err(SbError::LengthMismatch {
                expected: input.len(),
                actual: output.len(),
            });
        }
        match op {
            TransformOp::Truncate => self.truncate_samples(input, output),
            TransformOp::Convolution => self.convolve_samples(input, output),
        }
        Ok(())
    }

    /// Run `op` on `signal` into a fresh signal
    fn apply(&self, op: TransformOp, signal: &Signal) -> Signal {
        let mut output = vec![0; signal.len()];
        match op {
            TransformOp::Truncate => self.truncate_samples(signal.samples(), &mut output),
            TransformOp::Convolution => self.convolve_samples(signal.samples(), &mut output),
        }
        output.into()
    }

    /// Clamp every sample into the truncation bounds
    fn truncate(&self, signal: &Signal) -> Signal {
        self.apply(TransformOp::Truncate, signal)
    }

    /// Convolve with the reference kernel (same length, zero padded)
    fn convolution(&self, signal: &Signal) -> Signal {
        self.apply(TransformOp::Convolution, signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engines() -> Vec<Box<dyn TransformEngine>> {
        let mut engines: Vec<Box<dyn TransformEngine>> = vec![Box::new(ScalarEngine::new())];
        for level in SimdLevel::supported_vector_levels() {
            engines.push(Box::new(VectorEngine::with_level(level).unwrap()));
        }
        engines
    }

    #[test]
    fn test_apply_into_rejects_length_mismatch() {
        let input = [10 as Sample; 40];
        for engine in engines() {
            for op in TransformOp::ALL {
                let mut short = [0 as Sample; 39];
                assert_eq!(
                    engine.apply_into(op, &input, &mut short),
                    Err(SbError::LengthMismatch {
                        expected: 40,
                        actual: 39
                    }),
                    "{} {}",
                    engine.name(),
                    op
                );
                // Untouched on failure
                assert!(short.iter().all(|&s| s == 0));
            }
        }
    }

    #[test]
    fn test_apply_into_matches_apply() {
        let signal = SignalGenerator::reference().generate();
        for engine in engines() {
            for op in TransformOp::ALL {
                let mut output = vec![0; signal.len()];
                engine.apply_into(op, signal.samples(), &mut output).unwrap();
                let expected = engine.apply(op, &signal).into_vec();
                assert_eq!(output, expected, "{} {}", engine.name(), op);
            }
        }
    }
}
