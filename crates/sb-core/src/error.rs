//! Error types for SignalBench

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SbError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No SIMD instruction set available on this CPU")]
    SimdUnsupported,

    #[error("SIMD level not available on this CPU: {0}")]
    SimdLevelUnavailable(String),

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Scalar and vector {op} outputs differ at sample {index}")]
    PathMismatch { op: String, index: usize },
}

/// Result type alias
pub type SbResult<T> = Result<T, SbError>;
