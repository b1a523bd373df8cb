//! Signal generator
//!
//! One period of a sine across the whole signal plus seeded uniform noise,
//! quantized to `i8`. The noise generator is re-seeded on every call, so
//! every `generate()` returns the same signal.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sb_core::{saturate, Sample, SbResult, Signal, SignalConfig};

/// Deterministic signal generator
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    /// Generator for a validated configuration
    pub fn new(config: SignalConfig) -> SbResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator for the reference configuration
    pub fn reference() -> Self {
        Self {
            config: SignalConfig::default(),
        }
    }

    /// Number of samples every generated signal has
    #[inline]
    pub fn length(&self) -> usize {
        self.config.length
    }

    pub fn generate(&self) -> Signal {
        let config = &self.config;
        let phase_step = TAU / config.length as f64;
        let amplitude = config.amplitude as f64;
        let mut rng = ChaCha8Rng::seed_from_u64(config.noise_seed);

        (0..config.length)
            .map(|i| {
                let phase = i as f64 * phase_step;
                let noise = if config.noise_amplitude > 0 {
                    rng.random_range(0..config.noise_amplitude as i32)
                } else {
                    0
                };
                // Truncates toward zero
                saturate((amplitude * phase.sin() + noise as f64) as i32)
            })
            .collect()
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::reference()
    }
}

/// Single impulse of `amplitude` at `index`, zero elsewhere
pub fn generate_impulse(len: usize, index: usize, amplitude: Sample) -> Signal {
    let mut samples = vec![0; len];
    if let Some(s) = samples.get_mut(index) {
        *s = amplitude;
    }
    samples.into()
}

/// Signal with every sample set to `value`
pub fn generate_constant(len: usize, value: Sample) -> Signal {
    vec![value; len].into()
}
