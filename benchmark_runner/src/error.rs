//!
//! The benchmark runner configuration error.
//!

use std::path::PathBuf;

///
/// The fatal configuration error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required environment variable is not set.
    #[error("${name} not set")]
    EnvironmentVariableMissing {
        /// The variable name.
        name: &'static str,
    },
    /// A required directory does not exist.
    #[error("{path:?} does not exist")]
    DirectoryMissing {
        /// The directory path.
        path: PathBuf,
    },
}
