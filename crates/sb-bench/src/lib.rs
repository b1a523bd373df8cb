//! # sb-bench
//!
//! Scalar vs vector benchmarks for the SignalBench transforms.
//!
//! ## Running
//!
//! ```bash
//! # Criterion benchmarks
//! cargo bench -p sb-bench
//!
//! # One-shot comparison report (JSON on stdout)
//! RUST_LOG=debug cargo run -p sb-bench --example path_comparison
//!
//! # Bit-exact reproducibility check
//! cargo run -p sb-bench --example determinism_check
//! ```

pub mod compare;
pub mod utils;

pub use compare::*;
pub use utils::*;
