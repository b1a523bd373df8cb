//! Path Comparison: scalar vs vector timing report.
//!
//! Runs truncate and convolution on both engines over the reference signal,
//! verifies they agree and prints a JSON report.
//!
//! Usage: path_comparison [iterations]

use anyhow::{bail, Context, Result};
use sb_bench::compare_all;
use sb_dsp::SignalProcessor;

const DEFAULT_ITERATIONS: usize = 1000;

fn main() -> Result<()> {
    env_logger::init();

    let iterations = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid iteration count: {arg}"))?,
        None => DEFAULT_ITERATIONS,
    };

    let mut processor = SignalProcessor::new();
    if !processor.vector_available() {
        bail!("no SIMD support on this CPU, nothing to compare");
    }

    let reports = compare_all(&mut processor, iterations)?;
    for report in &reports {
        eprintln!("{}", report.summary());
    }
    println!("{}", serde_json::to_string_pretty(&reports)?);

    Ok(())
}
