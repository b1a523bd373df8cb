//! Determinism Checker: verifies transform bit-exact reproducibility.
//!
//! Generates the reference signal and runs every transform on every
//! available engine several times; all runs and both engines must produce
//! identical bytes.
//!
//! Exit code 0 = deterministic, 1 = non-deterministic

use sb_core::{EngineKind, Signal, TransformOp};
use sb_dsp::{SignalProcessor, SimdLevel};

const NUM_RUNS: usize = 5;

fn check(processor: &mut SignalProcessor, op: TransformOp, kinds: &[EngineKind]) -> bool {
    let signal = processor.generate_signal();
    let mut reference: Option<Signal> = None;

    for &kind in kinds {
        for run in 0..NUM_RUNS {
            let output = match processor.run(op, &signal, kind) {
                Ok(result) => result.signal,
                Err(e) => {
                    println!("ERROR {} {}: {}", op, kind, e);
                    return false;
                }
            };
            match &reference {
                None => reference = Some(output),
                Some(expected) => {
                    if let Some(index) = expected.first_difference(&output) {
                        println!("FAIL {} {} run {}: first difference at sample {}", op, kind, run, index);
                        return false;
                    }
                }
            }
        }
    }

    println!("PASS {} ({} runs x {} engines)", op, NUM_RUNS, kinds.len());
    true
}

fn main() {
    env_logger::init();

    let mut all_ok = true;
    let mut processors = vec![(SimdLevel::Scalar, SignalProcessor::new().without_vector())];
    for level in SimdLevel::supported_vector_levels() {
        match SignalProcessor::new().with_simd_level(level) {
            Ok(processor) => processors.push((level, processor)),
            Err(e) => println!("SKIP {}: {}", level, e),
        }
    }

    for (level, processor) in &mut processors {
        let kinds: &[EngineKind] = if *level == SimdLevel::Scalar {
            &[EngineKind::Scalar]
        } else {
            &[EngineKind::Scalar, EngineKind::Vector]
        };
        println!("--- {} ---", level);
        for op in TransformOp::ALL {
            all_ok &= check(processor, op, kinds);
        }
    }

    std::process::exit(if all_ok { 0 } else { 1 });
}
