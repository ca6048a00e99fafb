//!
//! The Arkouda benchmark runner library.
//!

pub mod benchmark;
pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod graphs;
pub mod process;
pub mod runner;
pub mod server;
pub mod stats;

#[cfg(all(test, unix))]
pub(crate) mod testing;

pub use self::client::Client;
pub use self::client::ScriptClient;
pub use self::config::Configuration;
pub use self::config::Options;
pub use self::environment::Environment;
pub use self::error::Error;
pub use self::graphs::GraphGenerator;
pub use self::runner::Runner;
pub use self::server::arkouda::ArkoudaServer;
pub use self::server::connection::Connection;
pub use self::server::guard::ServerGuard;
pub use self::server::job_id::JobId;
pub use self::server::launch::Launch;
pub use self::server::launch::LaunchConfig;
pub use self::server::Server;
pub use self::stats::PerfStats;

/// The successful exit code.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The failure exit code.
pub const EXIT_CODE_FAILURE: i32 = 1;
