//! Processing facade
//!
//! The single entry point for callers: generate the reference signal, run
//! truncate or convolution on the scalar or vector engine, and query the
//! duration of the last transform.

use sb_core::{EngineKind, SbError, SbResult, Signal, SignalConfig, TransformOp};

use crate::generator::SignalGenerator;
use crate::scalar::ScalarEngine;
use crate::simd::SimdLevel;
use crate::timing::{ProcessingTimer, TimingRecord};
use crate::vector::VectorEngine;
use crate::TransformEngine;

/// Output of one transform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// Transformed signal, owned by the caller
    pub signal: Signal,
    /// Duration of this call
    pub timing: TimingRecord,
    /// Engine that produced the signal
    pub engine: EngineKind,
}

/// Processing facade over the scalar and vector engines
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    generator: SignalGenerator,
    scalar: ScalarEngine,
    vector: Option<VectorEngine>,
    timer: ProcessingTimer,
}

impl SignalProcessor {
    /// Facade for the reference configuration with the best available vector engine
    pub fn new() -> Self {
        Self::build(SignalGenerator::reference())
    }

    /// Facade for a custom generator configuration
    pub fn with_config(config: SignalConfig) -> SbResult<Self> {
        Ok(Self::build(SignalGenerator::new(config)?))
    }

    fn build(generator: SignalGenerator) -> Self {
        let vector = match VectorEngine::new() {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("Vector path disabled: {}", e);
                None
            }
        };
        log::info!(
            "SignalProcessor: {} samples, vector engine {}",
            generator.length(),
            vector.map_or("unavailable", |v| v.name())
        );

        Self {
            generator,
            scalar: ScalarEngine::new(),
            vector,
            timer: ProcessingTimer::new(),
        }
    }

    /// Pin the vector path to a specific SIMD level
    pub fn with_simd_level(mut self, level: SimdLevel) -> SbResult<Self> {
        self.vector = Some(VectorEngine::with_level(level)?);
        Ok(self)
    }

    /// Disable the vector path; vector requests then fail with `SimdUnsupported`
    pub fn without_vector(mut self) -> Self {
        self.vector = None;
        self
    }

    /// Generate the reference signal (identical on every call)
    pub fn generate_signal(&self) -> Signal {
        self.generator.generate()
    }

    /// Clamp `signal` on the vector engine if `use_vector`, else on the scalar engine
    pub fn truncate(&mut self, signal: &Signal, use_vector: bool) -> SbResult<TransformResult> {
        self.run(TransformOp::Truncate, signal, EngineKind::from_flag(use_vector))
    }

    /// Convolve `signal` on the vector engine if `use_vector`, else on the scalar engine
    pub fn convolution(&mut self, signal: &Signal, use_vector: bool) -> SbResult<TransformResult> {
        self.run(TransformOp::Convolution, signal, EngineKind::from_flag(use_vector))
    }

    /// Run one transform on the chosen engine and record its duration
    pub fn run(
        &mut self,
        op: TransformOp,
        signal: &Signal,
        kind: EngineKind,
    ) -> SbResult<TransformResult> {
        let engine: &dyn TransformEngine = match kind {
            EngineKind::Scalar => &self.scalar,
            EngineKind::Vector => self.vector.as_ref().ok_or(SbError::SimdUnsupported)?,
        };

        let (output, timing) = self.timer.measure(|| engine.apply(op, signal));
        log::debug!(
            "{} ({}) processed {} samples in {:.2}us",
            op,
            engine.name(),
            signal.len(),
            timing.as_micros_f64()
        );

        Ok(TransformResult {
            signal: output,
            timing,
            engine: kind,
        })
    }

    /// Duration of the last transform, `None` before the first one
    #[inline]
    pub fn processing_time(&self) -> Option<TimingRecord> {
        self.timer.last()
    }

    /// Duration of the last transform in microseconds, `NO_PROCESSING_TIME_US` before the first one
    #[inline]
    pub fn processing_time_us(&self) -> f64 {
        self.timer.last_us()
    }

    /// Length of every generated signal
    #[inline]
    pub fn signal_length(&self) -> usize {
        self.generator.length()
    }

    #[inline]
    pub fn vector_available(&self) -> bool {
        self.vector.is_some()
    }

    /// SIMD level of the vector path, `Scalar` when it is disabled
    pub fn simd_level(&self) -> SimdLevel {
        self.vector.map_or(SimdLevel::Scalar, |v| v.level())
    }

    /// Engine behind a selection
    pub fn engine(&self, kind: EngineKind) -> SbResult<&dyn TransformEngine> {
        match kind {
            EngineKind::Scalar => Ok(&self.scalar),
            EngineKind::Vector => self
                .vector
                .as_ref()
                .map(|v| v as &dyn TransformEngine)
                .ok_or(SbError::SimdUnsupported),
        }
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new()
    }
}
