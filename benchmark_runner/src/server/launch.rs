//!
//! The server launch parameters and result.
//!

use std::path::PathBuf;

use crate::server::connection::Connection;
use crate::server::job_id::JobId;

/// The placeholder value the Chapel launcher propagates to the compute nodes.
pub const SCHEDULER_SENTINEL: &str = "sentinel";

/// The scheduler variables the launcher only propagates if they are already set.
pub const SCHEDULER_VARIABLES: [&str; 2] = ["SLURM_JOBID", "SLURM_NODELIST"];

/// The launcher hook run on the compute nodes before the server binary.
pub const LAUNCHER_WRAPPER_VARIABLE: &str = "CHPL_LAUNCHER_REAL_WRAPPER";

/// The file the launcher hook writes the job identifier to.
pub const JOB_ID_FILE_VARIABLE: &str = "WRITE_SLURM_ID_FILENAME";

/// The launcher hook script name, relative to the benchmarks directory.
pub const LAUNCHER_WRAPPER_NAME: &str = "write_slurm_id.bash";

/// The job identifier file name prefix.
pub const JOB_ID_FILE_PREFIX: &str = "write_slurm_filename";

///
/// The server launch parameters.
///
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// The number of locales.
    pub num_locales: usize,
    /// The environment variables set for the server process only.
    pub environment: Vec<(String, String)>,
    /// The file the launcher hook writes the job identifier to.
    pub job_id_file: PathBuf,
}

impl LaunchConfig {
    ///
    /// Creates the launch parameters which capture the scheduler job identifier
    /// through the launcher hook.
    ///
    pub fn new(num_locales: usize, launcher_wrapper: PathBuf, job_id_file: PathBuf) -> Self {
        let mut environment: Vec<(String, String)> = SCHEDULER_VARIABLES
            .iter()
            .map(|name| (name.to_string(), SCHEDULER_SENTINEL.to_owned()))
            .collect();
        environment.push((
            LAUNCHER_WRAPPER_VARIABLE.to_owned(),
            launcher_wrapper.to_string_lossy().into_owned(),
        ));
        environment.push((
            JOB_ID_FILE_VARIABLE.to_owned(),
            job_id_file.to_string_lossy().into_owned(),
        ));

        Self {
            num_locales,
            environment,
            job_id_file,
        }
    }

    ///
    /// Returns the job identifier file name unique to this process.
    ///
    pub fn job_id_file_name() -> String {
        format!("{JOB_ID_FILE_PREFIX}.{}", std::process::id())
    }
}

///
/// The started server.
///
#[derive(Debug, Clone)]
pub struct Launch {
    /// The scheduler job identifier.
    pub job_id: JobId,
    /// The address to connect the clients to.
    pub connection: Connection,
}
