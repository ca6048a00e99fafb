//!
//! The benchmark set.
//!

use std::path::Path;
use std::path::PathBuf;

///
/// The benchmarks run when none are specified on the command line.
///
pub const DEFAULT: [&str; 17] = [
    "stream",
    "argsort",
    "coargsort",
    "groupby",
    "aggregate",
    "gather",
    "scatter",
    "reduce",
    "scan",
    "noop",
    "setops",
    "array_create",
    "IO",
    "str-argsort",
    "str-coargsort",
    "str-groupby",
    "str-gather",
];

/// The benchmark client script extension.
pub const EXTENSION: &str = "py";

/// The pseudo-benchmark name for the compilation time measurements.
pub const COMPILATION_TIME: &str = "comp-time";

/// The pseudo-benchmark name for the emitted code size measurements.
pub const EMITTED_CODE_SIZE: &str = "emitted-code-size";

///
/// Returns the requested benchmarks, or the default set if none are requested.
///
pub fn resolve(requested: Vec<String>) -> Vec<String> {
    if requested.is_empty() {
        DEFAULT.iter().map(|name| name.to_string()).collect()
    } else {
        requested
    }
}

///
/// Returns the client script path of the benchmark.
///
pub fn script_path(benchmark_dir: &Path, name: &str) -> PathBuf {
    benchmark_dir.join(format!("{name}.{EXTENSION}"))
}
