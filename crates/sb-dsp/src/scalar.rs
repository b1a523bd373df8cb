//! Scalar reference transforms
//!
//! Sequential, non-vectorized truncate and convolution. These define the
//! expected output of every SIMD kernel in `crate::simd`.

use sb_core::{
    saturate, EngineKind, Sample, KERNEL, KERNEL_OFFSET, KERNEL_SHIFT, TRUNCATE_THRESHOLD,
};

use crate::TransformEngine;

/// Clamp every sample into `[-TRUNCATE_THRESHOLD, TRUNCATE_THRESHOLD]`
pub fn truncate_into(input: &[Sample], output: &mut [Sample]) {
    debug_assert_eq!(input.len(), output.len());
    for (out, &x) in output.iter_mut().zip(input) {
        *out = x.clamp(-TRUNCATE_THRESHOLD, TRUNCATE_THRESHOLD);
    }
}

/// Single convolution output at `index`, zero padded outside the input
#[inline]
pub fn convolve_at(input: &[Sample], index: usize) -> Sample {
    let mut acc: i32 = 0;
    for (j, &k) in KERNEL.iter().enumerate() {
        let x = (index + j)
            .checked_sub(KERNEL_OFFSET)
            .and_then(|pos| input.get(pos))
            .copied()
            .unwrap_or(0);
        acc += k as i32 * x as i32;
    }
    // Arithmetic shift floors, matching the vector `srai`/`vshr` lanes
    saturate(acc >> KERNEL_SHIFT)
}

/// Convolve with the reference kernel, output has the input's length
pub fn convolve_into(input: &[Sample], output: &mut [Sample]) {
    debug_assert_eq!(input.len(), output.len());
    let len = input.len().min(output.len());
    let input = &input[..len];
    for (i, out) in output[..len].iter_mut().enumerate() {
        *out = convolve_at(input, i);
    }
}

/// Scalar transform engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarEngine;

impl ScalarEngine {
    pub fn new() -> Self {
        Self
    }
}

impl TransformEngine for ScalarEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Scalar
    }

    fn name(&self) -> &'static str {
        "Scalar"
    }

    fn truncate_samples(&self, input: &[Sample], output: &mut [Sample]) {
        truncate_into(input, output);
    }

    fn convolve_samples(&self, input: &[Sample], output: &mut [Sample]) {
        convolve_into(input, output);
    }
}
