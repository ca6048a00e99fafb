//!
//! The benchmark run configuration.
//!

use std::path::PathBuf;

use crate::benchmark;
use crate::environment::Environment;
use crate::error::Error;

/// The `.dat` files directory, relative to the benchmarks directory.
pub const DAT_DIRECTORY_DEFAULT: &str = "datdir";

/// The graphs directory, relative to the `.dat` files directory.
pub const GRAPH_DIRECTORY_DEFAULT: &str = "html";

/// The graph infrastructure directory, relative to the benchmarks directory.
pub const GRAPH_INFRA_DIRECTORY_DEFAULT: &str = "graph_infra";

///
/// The user-supplied run options, before the defaults are applied.
///
#[derive(Debug, Default, Clone)]
pub struct Options {
    /// The number of locales to start the server with.
    pub num_locales: Option<usize>,
    /// The number of trials of every benchmark.
    pub num_trials: usize,
    /// The benchmark names.
    pub benchmarks: Vec<String>,
    /// Whether to update the `.dat` files and generate graphs.
    pub gen_graphs: bool,
    /// The `.dat` files directory.
    pub dat_dir: Option<PathBuf>,
    /// The generated graphs directory.
    pub graph_dir: Option<PathBuf>,
    /// The graph infrastructure directory.
    pub graph_infra: Option<PathBuf>,
    /// The test platform name.
    pub platform_name: String,
    /// The description of this configuration.
    pub description: String,
    /// The file containing graph annotations.
    pub annotations: String,
    /// The comma-separated list of configurations to graph.
    pub configs: Option<String>,
    /// The graph start date.
    pub start_date: Option<String>,
    /// The arguments forwarded to every benchmark client.
    pub client_arguments: Vec<String>,
}

///
/// The resolved benchmark run configuration.
///
#[derive(Debug, Clone)]
pub struct Configuration {
    /// The number of locales to start the server with.
    pub num_locales: usize,
    /// The number of trials of every benchmark. Never zero.
    pub num_trials: usize,
    /// The benchmark names.
    pub benchmarks: Vec<String>,
    /// Whether to update the `.dat` files and generate graphs.
    pub gen_graphs: bool,
    /// The Arkouda benchmarks directory.
    pub benchmark_dir: PathBuf,
    /// The `.dat` files directory.
    pub dat_dir: PathBuf,
    /// The generated graphs directory.
    pub graph_dir: PathBuf,
    /// The graph infrastructure directory.
    pub graph_infra: PathBuf,
    /// The Chapel graphing utilities directory. Only resolved if graphs are requested.
    pub chpl_util_dir: Option<PathBuf>,
    /// The test platform name.
    pub platform_name: String,
    /// The description of this configuration.
    pub description: String,
    /// The file containing graph annotations.
    pub annotations: String,
    /// The comma-separated list of configurations to graph.
    pub configs: Option<String>,
    /// The graph start date.
    pub start_date: Option<String>,
    /// The compilation passes timing file.
    pub print_passes_file: Option<PathBuf>,
    /// The emitted code size file.
    pub emitted_code_size_file: Option<PathBuf>,
    /// The arguments forwarded to every benchmark client.
    pub client_arguments: Vec<String>,
}

impl Configuration {
    ///
    /// Merges the options with the defaults derived from the environment.
    ///
    pub fn resolve(options: Options, environment: &Environment) -> Result<Self, Error> {
        let benchmark_dir = environment.benchmark_dir()?;
        let chpl_util_dir = if options.gen_graphs {
            Some(environment.chpl_util_dir()?)
        } else {
            None
        };

        let dat_dir = options
            .dat_dir
            .unwrap_or_else(|| benchmark_dir.join(DAT_DIRECTORY_DEFAULT));
        let graph_dir = options
            .graph_dir
            .unwrap_or_else(|| dat_dir.join(GRAPH_DIRECTORY_DEFAULT));
        let graph_infra = options
            .graph_infra
            .unwrap_or_else(|| benchmark_dir.join(GRAPH_INFRA_DIRECTORY_DEFAULT));

        Ok(Self {
            num_locales: options
                .num_locales
                .unwrap_or_else(|| environment.default_num_locales()),
            num_trials: options.num_trials.max(1),
            benchmarks: benchmark::resolve(options.benchmarks),
            gen_graphs: options.gen_graphs,
            benchmark_dir,
            dat_dir,
            graph_dir,
            graph_infra,
            chpl_util_dir,
            platform_name: options.platform_name,
            description: options.description,
            annotations: options.annotations,
            configs: options.configs,
            start_date: options.start_date,
            print_passes_file: environment.print_passes_file.clone(),
            emitted_code_size_file: environment.emitted_code_size_file.clone(),
            client_arguments: options.client_arguments,
        })
    }

    ///
    /// Returns the `.dat` files directory of this configuration description.
    ///
    pub fn config_dat_dir(&self) -> PathBuf {
        if self.description.is_empty() {
            self.dat_dir.clone()
        } else {
            self.dat_dir.join(self.description.as_str())
        }
    }
}
