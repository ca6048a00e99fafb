//!
//! The performance graphs generation.
//!

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::config::Configuration;
use crate::process;

/// The Chapel graph generation utility name.
pub const EXECUTABLE_NAME: &str = "genGraphs";

/// The graph list file name, relative to the graph infrastructure directory.
pub const GRAPH_LIST_FILE_NAME: &str = "GRAPHLIST";

/// The graphs page title.
pub const TITLE: &str = "Arkouda Performance Graphs";

///
/// Renders the `.dat` files history with `genGraphs`.
///
#[derive(Debug, Clone)]
pub struct GraphGenerator {
    /// The `genGraphs` executable.
    executable: PathBuf,
}

impl GraphGenerator {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(chpl_util_dir: &Path) -> Self {
        Self {
            executable: chpl_util_dir.join(EXECUTABLE_NAME),
        }
    }

    ///
    /// Builds the generation command.
    ///
    /// The platform name, configurations, start date and annotations are only
    /// passed if they are set.
    ///
    pub fn command(&self, configuration: &Configuration) -> Command {
        let mut command = Command::new(self.executable.as_path());
        command
            .arg("--perfdir")
            .arg(configuration.dat_dir.as_path())
            .arg("--outdir")
            .arg(configuration.graph_dir.as_path())
            .arg("--graphlist")
            .arg(configuration.graph_infra.join(GRAPH_LIST_FILE_NAME))
            .arg("--testdir")
            .arg(configuration.graph_infra.as_path())
            .arg("--alttitle")
            .arg(TITLE);

        if !configuration.platform_name.is_empty() {
            command.arg("--name").arg(configuration.platform_name.as_str());
        }
        if let Some(configs) = configuration
            .configs
            .as_deref()
            .filter(|configs| !configs.is_empty())
        {
            command.arg("--configs").arg(configs);
        }
        if let Some(start_date) = configuration
            .start_date
            .as_deref()
            .filter(|start_date| !start_date.is_empty())
        {
            command.arg("--startdate").arg(start_date);
        }
        if !configuration.annotations.is_empty() {
            command.arg("--annotate").arg(configuration.annotations.as_str());
        }
        command
    }

    ///
    /// Generates the graphs.
    ///
    pub fn generate(&self, configuration: &Configuration) -> anyhow::Result<()> {
        tracing::info!(graph_dir = ?configuration.graph_dir, "generating graphs");
        process::run(&mut self.command(configuration))
            .map_err(|error| error.context("Graphs generation"))?;
        Ok(())
    }
}
