//!
//! The scoped server resource.
//!

use crate::server::launch::Launch;
use crate::server::launch::LaunchConfig;
use crate::server::Server;

///
/// Keeps the server running while alive.
///
/// [`ServerGuard::stop`] stops the server and reports the error. If the guard
/// is dropped without it, e.g. when a benchmark fails, the server is stopped
/// on drop and the error is logged.
///
pub struct ServerGuard<'a, S: Server> {
    /// The running server.
    server: &'a mut S,
    /// The launch result.
    launch: Launch,
    /// Whether the server has already been stopped.
    stopped: bool,
}

impl<'a, S: Server> ServerGuard<'a, S> {
    ///
    /// Starts the server.
    ///
    pub fn start(server: &'a mut S, config: &LaunchConfig) -> anyhow::Result<Self> {
        let launch = server.start(config)?;
        tracing::info!(
            job_id = %launch.job_id,
            connection = %launch.connection,
            "server started"
        );
        Ok(Self {
            server,
            launch,
            stopped: false,
        })
    }

    ///
    /// Returns the launch result.
    ///
    pub fn launch(&self) -> &Launch {
        &self.launch
    }

    ///
    /// Stops the server.
    ///
    pub fn stop(mut self) -> anyhow::Result<()> {
        self.stopped = true;
        self.server.stop()?;
        tracing::info!("server stopped");
        Ok(())
    }
}

impl<S: Server> Drop for ServerGuard<'_, S> {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        tracing::warn!("stopping the server after a failure");
        if let Err(error) = self.server.stop() {
            tracing::error!("server stopping: {error:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ServerGuard;
    use crate::server::connection::Connection;
    use crate::server::job_id::JobId;
    use crate::server::launch::Launch;
    use crate::server::launch::LaunchConfig;
    use crate::server::Server;

    #[derive(Default)]
    struct Counter {
        starts: usize,
        stops: usize,
        fail_stop: bool,
    }

    impl Server for Counter {
        fn start(&mut self, _config: &LaunchConfig) -> anyhow::Result<Launch> {
            self.starts += 1;
            Ok(Launch {
                job_id: JobId::new("1".to_owned()),
                connection: Connection::new("localhost".to_owned(), 5555),
            })
        }

        fn stop(&mut self) -> anyhow::Result<()> {
            self.stops += 1;
            if self.fail_stop {
                anyhow::bail!("shutdown refused");
            }
            Ok(())
        }
    }

    fn config() -> LaunchConfig {
        LaunchConfig::new(1, PathBuf::from("hook"), PathBuf::from("job"))
    }

    #[test]
    fn explicit_stop() {
        let mut server = Counter::default();
        let guard = ServerGuard::start(&mut server, &config()).expect("Must start");
        assert_eq!(guard.launch().job_id.to_string(), "1");
        guard.stop().expect("Must stop");
        assert_eq!((server.starts, server.stops), (1, 1));
    }

    #[test]
    fn stop_on_drop() {
        let mut server = Counter::default();
        {
            let _guard = ServerGuard::start(&mut server, &config()).expect("Must start");
        }
        assert_eq!((server.starts, server.stops), (1, 1));
    }

    #[test]
    fn stop_error_is_reported_once() {
        let mut server = Counter {
            fail_stop: true,
            ..Default::default()
        };
        let guard = ServerGuard::start(&mut server, &config()).expect("Must start");
        assert!(guard.stop().is_err());
        assert_eq!(server.stops, 1);
    }
}
