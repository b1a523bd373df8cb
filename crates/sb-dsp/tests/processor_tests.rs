//! Processing Facade Tests
//!
//! Scenarios run through `SignalProcessor`, on both engines where the CPU
//! has a vector path.

use sb_core::{
    EngineKind, Sample, SbError, Signal, SignalConfig, KERNEL, KERNEL_OFFSET, KERNEL_SUM,
    TRUNCATE_THRESHOLD,
};
use sb_dsp::{generate_impulse, SignalProcessor, SimdLevel, NO_PROCESSING_TIME_US};

/// Engine flags to exercise on this machine
fn flags(processor: &SignalProcessor) -> Vec<bool> {
    if processor.vector_available() {
        vec![false, true]
    } else {
        vec![false]
    }
}

#[test]
fn test_generate_is_repeatable() {
    let processor = SignalProcessor::new();
    let first = processor.generate_signal();
    assert_eq!(first.len(), processor.signal_length());
    for _ in 0..3 {
        assert_eq!(processor.generate_signal(), first);
    }
}

#[test]
fn test_truncate_256_within_bounds() {
    let mut processor = SignalProcessor::with_config(SignalConfig::with_length(256)).unwrap();
    let signal = processor.generate_signal();

    let scalar = processor.truncate(&signal, false).unwrap().signal;
    assert_eq!(scalar.len(), 256);
    assert!(scalar
        .iter()
        .all(|&s| (-TRUNCATE_THRESHOLD..=TRUNCATE_THRESHOLD).contains(&s)));

    // In-range samples pass through untouched
    for (&before, &after) in signal.iter().zip(scalar.iter()) {
        if (-TRUNCATE_THRESHOLD..=TRUNCATE_THRESHOLD).contains(&before) {
            assert_eq!(before, after);
        }
    }

    if processor.vector_available() {
        let vector = processor.truncate(&signal, true).unwrap().signal;
        assert_eq!(vector, scalar);
    }
}

#[test]
fn test_zero_signal_convolves_to_zero() {
    let mut processor = SignalProcessor::new();
    let zeros = Signal::zeros(64);
    for use_vector in flags(&processor) {
        let output = processor.convolution(&zeros, use_vector).unwrap().signal;
        assert_eq!(output, zeros);
    }
}

#[test]
fn test_impulse_reproduces_kernel() {
    let mut processor = SignalProcessor::new();
    let len = 64;
    let at = 30;

    for use_vector in flags(&processor) {
        // Impulse of the kernel sum: normalisation gives back the taps exactly
        let unit = generate_impulse(len, at, KERNEL_SUM as Sample);
        let output = processor.convolution(&unit, use_vector).unwrap().signal;
        let mut expected = vec![0 as Sample; len];
        for (j, &k) in KERNEL.iter().enumerate() {
            expected[at + KERNEL_OFFSET - j] = k;
        }
        assert_eq!(output.samples(), expected.as_slice());

        // Full-scale impulse: taps scaled by 127 / 32, floored
        let peak = generate_impulse(len, at, Sample::MAX);
        let output = processor.convolution(&peak, use_vector).unwrap().signal;
        let scaled: Vec<Sample> = [1, 3, 5, 7, 7, 5, 3, 1]
            .iter()
            .map(|&k: &i32| ((k * 127) >> 5) as Sample)
            .collect();
        assert_eq!(&output.samples()[at - 3..=at + 4], scaled.as_slice());
        assert_eq!(&output.samples()[at - 3..=at + 4], &[3, 11, 19, 27, 27, 19, 11, 3]);
    }
}

#[test]
fn test_impulse_at_edges() {
    let mut processor = SignalProcessor::new();
    for use_vector in flags(&processor) {
        let first = generate_impulse(20, 0, KERNEL_SUM as Sample);
        let output = processor.convolution(&first, use_vector).unwrap().signal;
        // Only outputs 0..=4 reach back to index 0
        assert_eq!(&output.samples()[..6], &[7, 7, 5, 3, 1, 0]);

        let last = generate_impulse(20, 19, KERNEL_SUM as Sample);
        let output = processor.convolution(&last, use_vector).unwrap().signal;
        assert_eq!(&output.samples()[15..], &[0, 1, 3, 5, 7]);
    }
}

#[test]
fn test_processing_time_lifecycle() {
    let mut processor = SignalProcessor::new();
    assert_eq!(processor.processing_time_us(), NO_PROCESSING_TIME_US);

    let signal = processor.generate_signal();
    for use_vector in flags(&processor) {
        let truncated = processor.truncate(&signal, use_vector).unwrap();
        assert_eq!(processor.processing_time(), Some(truncated.timing));
        let convolved = processor.convolution(&signal, use_vector).unwrap();
        assert_eq!(processor.processing_time(), Some(convolved.timing));
        assert!(processor.processing_time_us() >= 0.0);
    }
}

#[test]
fn test_vector_request_without_simd() {
    let mut processor = SignalProcessor::new().without_vector();
    let signal = processor.generate_signal();
    assert_eq!(processor.truncate(&signal, true).unwrap_err(), SbError::SimdUnsupported);
    assert!(processor.truncate(&signal, false).is_ok());
}

#[test]
fn test_no_scalar_fallback_without_simd() {
    let mut processor = SignalProcessor::new().without_vector();
    let signal = processor.generate_signal();
    let baseline = processor.truncate(&signal, false).unwrap().timing;

    assert_eq!(
        processor.convolution(&signal, true).unwrap_err(),
        SbError::SimdUnsupported
    );
    assert!(matches!(
        processor.engine(EngineKind::Vector),
        Err(SbError::SimdUnsupported)
    ));
    assert_eq!(processor.simd_level(), SimdLevel::Scalar);
    // A refused request leaves the last timing in place
    assert_eq!(processor.processing_time(), Some(baseline));
}

#[test]
fn test_output_buffers_are_fresh() {
    let mut processor = SignalProcessor::new();
    let signal = processor.generate_signal();
    let copy = signal.clone();
    let a = processor.convolution(&signal, false).unwrap().signal;
    let b = processor.convolution(&signal, false).unwrap().signal;
    assert_eq!(signal, copy);
    assert_eq!(a, b);
}
