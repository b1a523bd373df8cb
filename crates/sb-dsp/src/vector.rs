//! Vector transform engine
//!
//! Thin engine over a `VectorDispatch` table. Construction fails instead of
//! quietly falling back to scalar code when the CPU has no SIMD support.

use sb_core::{EngineKind, Sample, SbError, SbResult};

use crate::simd::{SimdLevel, VectorDispatch};
use crate::TransformEngine;

/// SIMD transform engine
#[derive(Debug, Clone, Copy)]
pub struct VectorEngine {
    dispatch: VectorDispatch,
}

impl VectorEngine {
    /// Engine for the best SIMD level of the running CPU
    pub fn new() -> SbResult<Self> {
        VectorDispatch::get()
            .map(|dispatch| Self { dispatch: *dispatch })
            .ok_or(SbError::SimdUnsupported)
    }

    /// Engine pinned to a specific SIMD level
    pub fn with_level(level: SimdLevel) -> SbResult<Self> {
        if level == SimdLevel::Scalar {
            return Err(SbError::SimdUnsupported);
        }
        VectorDispatch::for_level(level)
            .map(|dispatch| Self { dispatch })
            .ok_or_else(|| SbError::SimdLevelUnavailable(level.name().to_string()))
    }

    #[inline]
    pub fn level(&self) -> SimdLevel {
        self.dispatch.level
    }

    /// Samples per vector instruction
    #[inline]
    pub fn lanes(&self) -> usize {
        self.dispatch.level.lanes()
    }
}

impl TransformEngine for VectorEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Vector
    }

    fn name(&self) -> &'static str {
        self.dispatch.level.name()
    }

    fn truncate_samples(&self, input: &[Sample], output: &mut [Sample]) {
        (self.dispatch.truncate)(input, output);
    }

    fn convolve_samples(&self, input: &[Sample], output: &mut [Sample]) {
        (self.dispatch.convolve)(input, output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::detect_simd_level;

    #[test]
    fn test_new_follows_detection() {
        match VectorEngine::new() {
            Ok(engine) => assert_eq!(engine.level(), detect_simd_level()),
            Err(e) => {
                assert_eq!(e, SbError::SimdUnsupported);
                assert_eq!(detect_simd_level(), SimdLevel::Scalar);
            }
        }
    }

    #[test]
    fn test_scalar_level_rejected() {
        assert_eq!(
            VectorEngine::with_level(SimdLevel::Scalar).unwrap_err(),
            SbError::SimdUnsupported
        );
    }

    #[test]
    fn test_unavailable_level_rejected() {
        for level in SimdLevel::ALL {
            if level != SimdLevel::Scalar && !level.is_supported() {
                assert!(matches!(
                    VectorEngine::with_level(level),
                    Err(SbError::SimdLevelUnavailable(_))
                ));
            }
        }
    }

    #[test]
    fn test_pinned_levels_report_lanes() {
        for level in SimdLevel::supported_vector_levels() {
            let engine = VectorEngine::with_level(level).unwrap();
            assert_eq!(engine.kind(), EngineKind::Vector);
            assert_eq!(engine.lanes(), level.lanes());
            assert_eq!(engine.name(), level.name());
        }
    }
}
