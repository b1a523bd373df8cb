//! Scalar / Vector Equivalence Tests
//!
//! Every SIMD level the CPU supports must reproduce the scalar reference
//! output byte-for-byte, for every length, including the remainder lanes
//! and the zero-padded convolution edges.

use proptest::prelude::*;
use sb_core::{Sample, Signal, KERNEL_LEN, TRUNCATE_THRESHOLD};
use sb_dsp::{
    generate_constant, ScalarEngine, SignalGenerator, SimdLevel, TransformEngine, VectorEngine,
};

/// Engines for every vector level available on this machine
fn vector_engines() -> Vec<VectorEngine> {
    SimdLevel::supported_vector_levels()
        .into_iter()
        .map(|level| VectorEngine::with_level(level).unwrap())
        .collect()
}

/// Deterministic full-range pattern
fn pattern(len: usize) -> Signal {
    (0..len)
        .map(|i| ((i as i64 * 97 + 13) % 256 - 128) as Sample)
        .collect()
}

fn assert_paths_match(signal: &Signal, context: &str) {
    let scalar = ScalarEngine::new();
    let expected_truncate = scalar.truncate(signal);
    let expected_convolution = scalar.convolution(signal);

    for engine in vector_engines() {
        let truncated = engine.truncate(signal);
        assert_eq!(
            expected_truncate.first_difference(&truncated),
            None,
            "{}: {} truncate differs (len {})",
            context,
            engine.name(),
            signal.len()
        );

        let convolved = engine.convolution(signal);
        assert_eq!(
            expected_convolution.first_difference(&convolved),
            None,
            "{}: {} convolution differs (len {})",
            context,
            engine.name(),
            signal.len()
        );
    }
}

#[test]
fn test_reference_signal_matches() {
    let signal = SignalGenerator::reference().generate();
    assert_paths_match(&signal, "reference");
}

#[test]
fn test_remainder_lengths_match() {
    let mut lengths = vec![0, 1, 2, KERNEL_LEN - 1, KERNEL_LEN, KERNEL_LEN + 1];
    for level in SimdLevel::supported_vector_levels() {
        let lanes = level.lanes();
        lengths.extend([lanes - 1, lanes, lanes + 1, 2 * lanes + 7, lanes + KERNEL_LEN]);
    }

    for len in lengths {
        assert_paths_match(&pattern(len), "pattern");
    }
}

#[test]
fn test_extreme_values_match() {
    // Saturated inputs exercise the widest accumulators
    for value in [Sample::MIN, Sample::MAX, -TRUNCATE_THRESHOLD - 1, TRUNCATE_THRESHOLD + 1] {
        for len in [17, 64, 100] {
            assert_paths_match(&generate_constant(len, value), "constant");
        }
    }
}

proptest! {
    #[test]
    fn prop_vector_matches_scalar(samples in prop::collection::vec(any::<i8>(), 0..300)) {
        let signal = Signal::from(samples);
        let scalar = ScalarEngine::new();
        let expected_truncate = scalar.truncate(&signal);
        let expected_convolution = scalar.convolution(&signal);

        for engine in vector_engines() {
            prop_assert_eq!(&engine.truncate(&signal), &expected_truncate);
            prop_assert_eq!(&engine.convolution(&signal), &expected_convolution);
        }
    }

    #[test]
    fn prop_truncate_is_idempotent(samples in prop::collection::vec(any::<i8>(), 0..300)) {
        let scalar = ScalarEngine::new();
        let once = scalar.truncate(&Signal::from(samples));
        let twice = scalar.truncate(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|&s| (-TRUNCATE_THRESHOLD..=TRUNCATE_THRESHOLD).contains(&s)));
    }

    #[test]
    fn prop_convolution_preserves_length(samples in prop::collection::vec(any::<i8>(), 0..300)) {
        let len = samples.len();
        let output = ScalarEngine::new().convolution(&Signal::from(samples));
        prop_assert_eq!(output.len(), len);
    }
}
