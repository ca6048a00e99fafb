//!
//! The performance statistics extraction.
//!

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::process;

/// The Chapel statistics extraction utility name.
pub const EXECUTABLE_NAME: &str = "computePerfStats";

/// The performance keys file extension.
pub const PERFKEYS_EXTENSION: &str = "perfkeys";

/// The fallback performance keys file name.
pub const PERFKEYS_DEFAULT: &str = "perfkeys";

/// The temporary benchmark output file suffix.
pub const OUTPUT_SUFFIX: &str = "exec.out.tmp";

///
/// Appends benchmark measurements to the `.dat` files with `computePerfStats`.
///
#[derive(Debug, Clone)]
pub struct PerfStats {
    /// The `computePerfStats` executable.
    executable: PathBuf,
    /// The graph infrastructure directory with the performance keys files.
    graph_infra: PathBuf,
    /// The directory the temporary output files are written to.
    working_directory: PathBuf,
}

impl PerfStats {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(chpl_util_dir: &Path, graph_infra: PathBuf, working_directory: PathBuf) -> Self {
        Self {
            executable: chpl_util_dir.join(EXECUTABLE_NAME),
            graph_infra,
            working_directory,
        }
    }

    ///
    /// Returns the performance keys file of the benchmark.
    ///
    /// `<graph_infra>/<benchmark>.perfkeys` is preferred over the generic
    /// `<graph_infra>/perfkeys`.
    ///
    pub fn perfkeys(&self, benchmark: &str) -> PathBuf {
        let specific = self
            .graph_infra
            .join(format!("{benchmark}.{PERFKEYS_EXTENSION}"));
        if specific.exists() {
            specific
        } else {
            self.graph_infra.join(PERFKEYS_DEFAULT)
        }
    }

    ///
    /// Creates or appends to the `.dat` file of the benchmark in `dat_dir`.
    ///
    /// The output is passed through a temporary file, which is removed
    /// whether the extraction succeeds or not.
    ///
    pub fn add_to_dat(&self, benchmark: &str, output: &str, dat_dir: &Path) -> anyhow::Result<()> {
        let output_path = self
            .working_directory
            .join(format!("{benchmark}.{OUTPUT_SUFFIX}"));
        std::fs::write(output_path.as_path(), output).map_err(|error| {
            anyhow::anyhow!("Benchmark output file {output_path:?} writing: {error}")
        })?;

        let perfkeys = self.perfkeys(benchmark);
        tracing::debug!(benchmark, perfkeys = ?perfkeys, "extracting performance statistics");
        let mut command = Command::new(self.executable.as_path());
        command
            .arg(benchmark)
            .arg(dat_dir)
            .arg(perfkeys)
            .arg(output_path.as_path());
        let result = process::run(&mut command);

        let removal = std::fs::remove_file(output_path.as_path()).map_err(|error| {
            anyhow::anyhow!("Benchmark output file {output_path:?} removing: {error}")
        });
        result.map_err(|error| error.context(format!("Benchmark `{benchmark}` statistics")))?;
        removal
    }
}
