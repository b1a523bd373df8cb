//! sb-core: Shared types for SignalBench
//!
//! Sample and signal types, the reference processing constants and the
//! error type used by every SignalBench crate.

mod config;
mod error;
mod sample;

pub use config::*;
pub use error::*;
pub use sample::*;

/// Which transform implementation produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EngineKind {
    Scalar,
    Vector,
}

impl EngineKind {
    /// Map the caller-facing selection flag to an engine kind
    #[inline]
    pub const fn from_flag(use_vector: bool) -> Self {
        if use_vector { Self::Vector } else { Self::Scalar }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EngineKind::Scalar => "scalar",
            EngineKind::Vector => "vector",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The two transforms every engine provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TransformOp {
    Truncate,
    Convolution,
}

impl TransformOp {
    pub const ALL: [TransformOp; 2] = [TransformOp::Truncate, TransformOp::Convolution];

    pub const fn name(self) -> &'static str {
        match self {
            TransformOp::Truncate => "truncate",
            TransformOp::Convolution => "convolution",
        }
    }
}

impl std::fmt::Display for TransformOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
