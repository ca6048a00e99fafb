//!
//! The process environment consumed by the runner.
//!

use std::path::PathBuf;

use crate::error::Error;

/// The Arkouda installation root.
pub const ARKOUDA_HOME: &str = "ARKOUDA_HOME";

/// The Chapel installation root, which provides the graphing utilities.
pub const CHPL_HOME: &str = "CHPL_HOME";

/// The default number of locales.
pub const ARKOUDA_NUMLOCALES: &str = "ARKOUDA_NUMLOCALES";

/// The Chapel communication layer, `none` for single-locale builds.
pub const CHPL_COMM: &str = "CHPL_COMM";

/// The file with the server compilation pass timings.
pub const ARKOUDA_PRINT_PASSES_FILE: &str = "ARKOUDA_PRINT_PASSES_FILE";

/// The file with the server emitted code size.
pub const ARKOUDA_EMITTED_CODE_SIZE_FILE: &str = "ARKOUDA_EMITTED_CODE_SIZE_FILE";

/// The server executable override.
pub const ARKOUDA_SERVER_EXECUTABLE: &str = "ARKOUDA_SERVER_EXECUTABLE";

/// The server port override.
pub const ARKOUDA_SERVER_PORT: &str = "ARKOUDA_SERVER_PORT";

/// The interpreter used to run client scripts, if they are not run directly.
pub const ARKOUDA_CLIENT_INTERPRETER: &str = "ARKOUDA_CLIENT_INTERPRETER";

/// The Chapel graphing utilities directory, relative to `$CHPL_HOME`.
pub const CHPL_UTIL_DIRECTORY: [&str; 2] = ["util", "test"];

/// The benchmarks directory, relative to `$ARKOUDA_HOME`.
pub const BENCHMARK_DIRECTORY: &str = "benchmarks";

/// The default server executable name, relative to `$ARKOUDA_HOME`.
pub const SERVER_EXECUTABLE_NAME: &str = "arkouda_server";

/// The default server port.
pub const SERVER_PORT_DEFAULT: u16 = 5555;

///
/// A snapshot of the environment variables the runner reads.
///
/// The runner never writes to the process environment. Variables meant for
/// child processes are passed to them explicitly.
///
#[derive(Debug, Default, Clone)]
pub struct Environment {
    /// `$ARKOUDA_HOME`.
    pub arkouda_home: Option<PathBuf>,
    /// `$CHPL_HOME`.
    pub chpl_home: Option<PathBuf>,
    /// `$ARKOUDA_NUMLOCALES`.
    pub num_locales: Option<String>,
    /// `$CHPL_COMM`.
    pub chpl_comm: Option<String>,
    /// `$ARKOUDA_PRINT_PASSES_FILE`.
    pub print_passes_file: Option<PathBuf>,
    /// `$ARKOUDA_EMITTED_CODE_SIZE_FILE`.
    pub emitted_code_size_file: Option<PathBuf>,
    /// `$ARKOUDA_SERVER_EXECUTABLE`.
    pub server_executable: Option<PathBuf>,
    /// `$ARKOUDA_SERVER_PORT`.
    pub server_port: Option<String>,
    /// `$ARKOUDA_CLIENT_INTERPRETER`.
    pub client_interpreter: Option<PathBuf>,
}

impl Environment {
    ///
    /// Reads the variables from the current process environment.
    ///
    /// Empty values are treated as unset.
    ///
    pub fn from_process() -> Self {
        Self {
            arkouda_home: Self::path(ARKOUDA_HOME),
            chpl_home: Self::path(CHPL_HOME),
            num_locales: Self::string(ARKOUDA_NUMLOCALES),
            chpl_comm: Self::string(CHPL_COMM),
            print_passes_file: Self::path(ARKOUDA_PRINT_PASSES_FILE),
            emitted_code_size_file: Self::path(ARKOUDA_EMITTED_CODE_SIZE_FILE),
            server_executable: Self::path(ARKOUDA_SERVER_EXECUTABLE),
            server_port: Self::string(ARKOUDA_SERVER_PORT),
            client_interpreter: Self::path(ARKOUDA_CLIENT_INTERPRETER),
        }
    }

    ///
    /// Returns `$ARKOUDA_HOME`, failing if it is not set.
    ///
    pub fn arkouda_home(&self) -> Result<PathBuf, Error> {
        self.arkouda_home
            .clone()
            .ok_or(Error::EnvironmentVariableMissing { name: ARKOUDA_HOME })
    }

    ///
    /// Returns the Arkouda benchmarks directory.
    ///
    pub fn benchmark_dir(&self) -> Result<PathBuf, Error> {
        Ok(self.arkouda_home()?.join(BENCHMARK_DIRECTORY))
    }

    ///
    /// Returns the Chapel directory that contains the graph generation utilities.
    ///
    pub fn chpl_util_dir(&self) -> Result<PathBuf, Error> {
        let mut path = self
            .chpl_home
            .clone()
            .ok_or(Error::EnvironmentVariableMissing { name: CHPL_HOME })?;
        path.extend(CHPL_UTIL_DIRECTORY);
        if !path.is_dir() {
            return Err(Error::DirectoryMissing { path });
        }
        Ok(path)
    }

    ///
    /// Returns the default number of locales to start the server with.
    ///
    /// `$ARKOUDA_NUMLOCALES` wins if it is a number. Otherwise, single-locale
    /// builds get one locale and multi-locale builds get two.
    ///
    pub fn default_num_locales(&self) -> usize {
        if let Some(num_locales) = self
            .num_locales
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
        {
            return num_locales;
        }
        match self.chpl_comm.as_deref() {
            None | Some("none") => 1,
            Some(_) => 2,
        }
    }

    ///
    /// Returns the server port, falling back to the default one.
    ///
    pub fn server_port(&self) -> anyhow::Result<u16> {
        match self.server_port.as_deref() {
            Some(port) => port.trim().parse().map_err(|error| {
                anyhow::anyhow!("${ARKOUDA_SERVER_PORT} `{port}` parsing: {error}")
            }),
            None => Ok(SERVER_PORT_DEFAULT),
        }
    }

    ///
    /// Returns the server executable, falling back to the one in `$ARKOUDA_HOME`.
    ///
    pub fn server_executable(&self) -> Result<PathBuf, Error> {
        match self.server_executable.clone() {
            Some(path) => Ok(path),
            None => Ok(self.arkouda_home()?.join(SERVER_EXECUTABLE_NAME)),
        }
    }

    fn string(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }

    fn path(name: &str) -> Option<PathBuf> {
        std::env::var_os(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}
