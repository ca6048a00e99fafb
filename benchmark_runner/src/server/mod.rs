//!
//! The compute server.
//!

pub mod arkouda;
pub mod connection;
pub mod guard;
pub mod job_id;
pub mod launch;

use self::launch::Launch;
use self::launch::LaunchConfig;

///
/// The compute server the benchmarks are run against.
///
pub trait Server {
    ///
    /// Starts the server and waits until it accepts connections.
    ///
    fn start(&mut self, config: &LaunchConfig) -> anyhow::Result<Launch>;

    ///
    /// Shuts the server down and waits for it to exit.
    ///
    fn stop(&mut self) -> anyhow::Result<()>;
}
