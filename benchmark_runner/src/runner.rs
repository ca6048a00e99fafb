//!
//! The benchmark runner.
//!

use std::path::Path;
use std::path::PathBuf;

use crate::benchmark;
use crate::client::Client;
use crate::config::Configuration;
use crate::graphs::GraphGenerator;
use crate::server::guard::ServerGuard;
use crate::server::job_id::JobId;
use crate::server::launch::LaunchConfig;
use crate::server::launch::LAUNCHER_WRAPPER_NAME;
use crate::server::Server;
use crate::stats::PerfStats;

///
/// The run result.
///
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The scheduler job identifier.
    pub job_id: JobId,
    /// The file with the last benchmark output.
    pub output_path: PathBuf,
    /// The number of client invocations.
    pub runs: usize,
}

///
/// The Chapel tools used when graphs are requested.
///
#[derive(Debug, Clone)]
struct Graphing {
    /// The `.dat` files updater.
    stats: PerfStats,
    /// The graphs renderer.
    generator: GraphGenerator,
}

///
/// Runs the benchmarks against a freshly started server.
///
pub struct Runner<S: Server, C: Client> {
    /// The run configuration.
    configuration: Configuration,
    /// The compute server.
    server: S,
    /// The benchmark client.
    client: C,
    /// The directory the output and temporary files are written to.
    working_directory: PathBuf,
    /// The graphing tools, if graphs are requested.
    graphing: Option<Graphing>,
}

impl<S: Server, C: Client> Runner<S, C> {
    ///
    /// Creates the runner.
    ///
    /// Fails if graphs are requested, but the Chapel utilities directory is
    /// not resolved in the configuration.
    ///
    pub fn new(
        configuration: Configuration,
        server: S,
        client: C,
        working_directory: PathBuf,
    ) -> anyhow::Result<Self> {
        let graphing = if configuration.gen_graphs {
            let chpl_util_dir = configuration.chpl_util_dir.as_deref().ok_or_else(|| {
                anyhow::anyhow!("Graphs are requested, but the Chapel utilities are not found")
            })?;
            Some(Graphing {
                stats: PerfStats::new(
                    chpl_util_dir,
                    configuration.graph_infra.clone(),
                    working_directory.clone(),
                ),
                generator: GraphGenerator::new(chpl_util_dir),
            })
        } else {
            None
        };

        Ok(Self {
            configuration,
            server,
            client,
            working_directory,
            graphing,
        })
    }

    ///
    /// Runs every benchmark the configured number of times, then updates the
    /// graphs if requested.
    ///
    /// The server is stopped on every exit path once it has been started.
    ///
    pub fn run(&mut self) -> anyhow::Result<Outcome> {
        let config_dat_dir = self.configuration.config_dat_dir();
        if self.graphing.is_some() {
            std::fs::create_dir_all(config_dat_dir.as_path()).map_err(|error| {
                anyhow::anyhow!("Directory {config_dat_dir:?} creation: {error}")
            })?;
        }

        let launch_config = LaunchConfig::new(
            self.configuration.num_locales,
            self.configuration.benchmark_dir.join(LAUNCHER_WRAPPER_NAME),
            self.working_directory.join(LaunchConfig::job_id_file_name()),
        );
        let server = ServerGuard::start(&mut self.server, &launch_config)?;
        let job_id = server.launch().job_id.clone();
        let connection = server.launch().connection.clone();

        let output_path = self.working_directory.join(job_id.output_file_name());
        tracing::info!(path = ?output_path, "writing benchmark output");

        let mut runs = 0;
        for name in self.configuration.benchmarks.iter() {
            let script = benchmark::script_path(self.configuration.benchmark_dir.as_path(), name);
            for trial in 0..self.configuration.num_trials {
                tracing::info!(benchmark = %name, trial, "running");
                let output = self.client.run(
                    script.as_path(),
                    &connection,
                    self.configuration.client_arguments.as_slice(),
                )?;
                runs += 1;

                if let Some(graphing) = self.graphing.as_ref() {
                    graphing
                        .stats
                        .add_to_dat(name, output.as_str(), config_dat_dir.as_path())?;
                }
                std::fs::write(output_path.as_path(), output).map_err(|error| {
                    anyhow::anyhow!("Benchmark output file {output_path:?} writing: {error}")
                })?;
            }
        }

        server.stop()?;

        if let Some(graphing) = self.graphing.as_ref() {
            let side_files = [
                (
                    benchmark::COMPILATION_TIME,
                    self.configuration.print_passes_file.as_deref(),
                ),
                (
                    benchmark::EMITTED_CODE_SIZE,
                    self.configuration.emitted_code_size_file.as_deref(),
                ),
            ];
            for (name, path) in side_files {
                let Some(path) = path.filter(|path| path.is_file()) else {
                    tracing::debug!(benchmark = name, "measurements file not found, skipping");
                    continue;
                };
                Self::add_side_file(&graphing.stats, name, path, config_dat_dir.as_path())?;
            }
            graphing.generator.generate(&self.configuration)?;
        }

        Ok(Outcome {
            job_id,
            output_path,
            runs,
        })
    }

    ///
    /// Folds a measurements file produced outside of the benchmarks into the `.dat` files.
    ///
    fn add_side_file(
        stats: &PerfStats,
        name: &str,
        path: &Path,
        config_dat_dir: &Path,
    ) -> anyhow::Result<()> {
        let output = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Measurements file {path:?} reading: {error}"))?;
        stats.add_to_dat(name, output.as_str(), config_dat_dir)
    }
}
