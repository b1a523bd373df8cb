//! Reference processing configuration
//!
//! The transforms run against a fixed "reference" configuration: a 1024
//! sample sine with seeded noise, a symmetric ±50 clamp and an 8-tap
//! smoothing kernel. Only the generator is configurable; the clamp bounds
//! and the kernel are constants so that scalar and vector paths can be
//! compared against the same fixed target.

use serde::{Deserialize, Serialize};

use crate::{SbError, SbResult, Sample};

/// Number of samples in the reference signal
pub const SIGNAL_LENGTH: usize = 1024;

/// Peak amplitude of the sine component
pub const SIGNAL_AMPLITUDE: u8 = 100;

/// Noise is drawn uniformly from `0..NOISE_AMPLITUDE`
pub const NOISE_AMPLITUDE: u8 = 25;

/// Seed of the noise generator
pub const NOISE_SEED: u64 = 0x5EED_0001;

/// Largest signal the generator accepts
pub const MAX_SIGNAL_LENGTH: usize = 1 << 20;

/// Truncation clamps every sample into `[-TRUNCATE_THRESHOLD, TRUNCATE_THRESHOLD]`
pub const TRUNCATE_THRESHOLD: Sample = 50;

/// FIR smoothing kernel (symmetric, sum is a power of two)
pub const KERNEL: [Sample; KERNEL_LEN] = [1, 3, 5, 7, 7, 5, 3, 1];

/// Number of kernel taps
pub const KERNEL_LEN: usize = 8;

/// Sum of the kernel taps
pub const KERNEL_SUM: i32 = kernel_sum(&KERNEL);

/// Normalisation is an arithmetic shift right by this amount (floor division by `KERNEL_SUM`)
pub const KERNEL_SHIFT: i32 = 5;

/// Output sample `i` reads input samples `i - KERNEL_OFFSET ..= i - KERNEL_OFFSET + KERNEL_LEN - 1`.
/// Reads outside the signal see zero.
pub const KERNEL_OFFSET: usize = KERNEL_LEN / 2;

const fn kernel_sum(kernel: &[Sample]) -> i32 {
    let mut sum = 0;
    let mut i = 0;
    while i < kernel.len() {
        sum += kernel[i] as i32;
        i += 1;
    }
    sum
}

const _: () = assert!(KERNEL_SUM == 1 << KERNEL_SHIFT);
// Widest possible accumulator must fit in i16 lanes
const _: () = assert!(KERNEL_SUM * 128 <= i16::MAX as i32 + 1);

/// Signal generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Number of samples
    pub length: usize,

    /// Peak amplitude of the sine component
    pub amplitude: u8,

    /// Exclusive upper bound of the additive noise (0 disables noise)
    pub noise_amplitude: u8,

    /// Noise generator seed
    pub noise_seed: u64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            length: SIGNAL_LENGTH,
            amplitude: SIGNAL_AMPLITUDE,
            noise_amplitude: NOISE_AMPLITUDE,
            noise_seed: NOISE_SEED,
        }
    }
}

impl SignalConfig {
    /// Reference configuration with a different length
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Noise-free sine, useful for exact waveform checks
    pub fn clean(length: usize) -> Self {
        Self {
            length,
            noise_amplitude: 0,
            ..Default::default()
        }
    }

    /// Check that the configuration produces an in-range signal
    pub fn validate(&self) -> SbResult<()> {
        if self.length == 0 {
            return Err(SbError::InvalidConfig("signal length must be non-zero".into()));
        }
        if self.length > MAX_SIGNAL_LENGTH {
            return Err(SbError::InvalidConfig(format!(
                "signal length {} exceeds maximum {}",
                self.length, MAX_SIGNAL_LENGTH
            )));
        }
        let peak = self.amplitude as u16 + (self.noise_amplitude as u16).saturating_sub(1);
        if peak > Sample::MAX as u16 {
            return Err(SbError::InvalidConfig(format!(
                "amplitude {} + noise {} exceeds the 8-bit sample range",
                self.amplitude, self.noise_amplitude
            )));
        }
        Ok(())
    }
}
