//!
//! The Arkouda server process.
//!

use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;
use std::time::Instant;

use crate::client::Client;
use crate::client::ScriptClient;
use crate::environment::Environment;
use crate::server::connection::Connection;
use crate::server::job_id::JobId;
use crate::server::launch::Launch;
use crate::server::launch::LaunchConfig;
use crate::server::Server;

/// The connection info file name, relative to the working directory.
pub const CONNECTION_INFO_FILE_NAME: &str = "ak-server-info";

/// The shutdown client script, relative to `$ARKOUDA_HOME`.
pub const SHUTDOWN_CLIENT_PATH: [&str; 3] = ["util", "test", "shutdown.py"];

/// The default time the server is given to start accepting connections.
pub const STARTUP_TIMEOUT_DEFAULT: Duration = Duration::from_secs(600);

/// The connection info file polling interval.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

///
/// The Arkouda server process launched through the Chapel launcher.
///
#[derive(Debug)]
pub struct ArkoudaServer {
    /// The server executable.
    executable: PathBuf,
    /// The client which asks the server to shut down.
    shutdown_client: ScriptClient,
    /// The shutdown client script.
    shutdown_script: PathBuf,
    /// The port to listen on.
    port: u16,
    /// The file the server writes its connection info to once it is ready.
    connection_info_file: PathBuf,
    /// The time the server is given to start accepting connections.
    startup_timeout: Duration,
    /// The running server process.
    process: Option<Child>,
    /// The running server address.
    connection: Option<Connection>,
}

impl ArkoudaServer {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        executable: PathBuf,
        shutdown_client: ScriptClient,
        shutdown_script: PathBuf,
        port: u16,
        connection_info_file: PathBuf,
    ) -> Self {
        Self {
            executable,
            shutdown_client,
            shutdown_script,
            port,
            connection_info_file,
            startup_timeout: STARTUP_TIMEOUT_DEFAULT,
            process: None,
            connection: None,
        }
    }

    ///
    /// Creates the server from the Arkouda installation in the environment.
    ///
    pub fn from_environment(
        environment: &Environment,
        working_directory: PathBuf,
    ) -> anyhow::Result<Self> {
        let mut shutdown_script = environment.arkouda_home()?;
        shutdown_script.extend(SHUTDOWN_CLIENT_PATH);
        Ok(Self::new(
            environment.server_executable()?,
            ScriptClient::from_environment(environment),
            shutdown_script,
            environment.server_port()?,
            working_directory.join(CONNECTION_INFO_FILE_NAME),
        ))
    }

    ///
    /// Sets the time the server is given to start accepting connections.
    ///
    pub fn with_startup_timeout(mut self, startup_timeout: Duration) -> Self {
        self.startup_timeout = startup_timeout;
        self
    }

    ///
    /// Waits until the server writes its connection info.
    ///
    fn wait_for_connection(&self, process: &mut Child) -> anyhow::Result<Connection> {
        let started_at = Instant::now();
        loop {
            if let Some(status) = process
                .try_wait()
                .map_err(|error| anyhow::anyhow!("Server process waiting: {error}"))?
            {
                anyhow::bail!("Server exited before accepting connections ({status})");
            }

            if let Ok(content) = std::fs::read_to_string(self.connection_info_file.as_path()) {
                if let Ok(connection) = Connection::from_info_file(content.as_str()) {
                    return Ok(connection);
                }
            }

            if started_at.elapsed() >= self.startup_timeout {
                anyhow::bail!(
                    "Server did not start within {}s",
                    self.startup_timeout.as_secs()
                );
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    ///
    /// Removes the connection info file left by a previous server.
    ///
    fn remove_connection_info(&self) -> anyhow::Result<()> {
        if self.connection_info_file.exists() {
            std::fs::remove_file(self.connection_info_file.as_path()).map_err(|error| {
                anyhow::anyhow!(
                    "Server connection info file {:?} removing: {error}",
                    self.connection_info_file
                )
            })?;
        }
        Ok(())
    }
}

impl Server for ArkoudaServer {
    fn start(&mut self, config: &LaunchConfig) -> anyhow::Result<Launch> {
        if self.process.is_some() {
            anyhow::bail!("Server is already running");
        }
        self.remove_connection_info()?;

        let mut command = Command::new(self.executable.as_path());
        command
            .arg("-nl")
            .arg(config.num_locales.to_string())
            .arg(format!("--ServerPort={}", self.port))
            .arg(format!(
                "--serverConnectionInfo={}",
                self.connection_info_file.to_string_lossy()
            ))
            .envs(config.environment.iter().cloned())
            .stdin(Stdio::null());
        tracing::info!(
            executable = ?self.executable,
            num_locales = config.num_locales,
            port = self.port,
            "starting server"
        );
        let mut process = command.spawn().map_err(|error| {
            anyhow::anyhow!("{:?} subprocess spawning error: {error:?}", self.executable)
        })?;

        let launch = self
            .wait_for_connection(&mut process)
            .and_then(|connection| {
                let job_id = match JobId::take(config.job_id_file.as_path())? {
                    Some(job_id) => job_id,
                    None => {
                        let job_id = JobId::fallback();
                        tracing::warn!(%job_id, "launcher hook wrote no job identifier");
                        job_id
                    }
                };
                Ok(Launch { job_id, connection })
            });
        match launch {
            Ok(launch) => {
                self.process = Some(process);
                self.connection = Some(launch.connection.clone());
                Ok(launch)
            }
            Err(error) => {
                let _ = process.kill();
                let _ = process.wait();
                if config.job_id_file.exists() {
                    let _ = std::fs::remove_file(config.job_id_file.as_path());
                }
                Err(error)
            }
        }
    }

    fn stop(&mut self) -> anyhow::Result<()> {
        let Some(mut process) = self.process.take() else {
            return Ok(());
        };
        let connection = self
            .connection
            .take()
            .ok_or_else(|| anyhow::anyhow!("Server connection info is missing"))?;

        if let Err(error) =
            self.shutdown_client
                .run(self.shutdown_script.as_path(), &connection, &[])
        {
            let _ = process.kill();
            let _ = process.wait();
            return Err(error.context("Server shutdown"));
        }

        let status = process
            .wait()
            .map_err(|error| anyhow::anyhow!("Server process waiting: {error}"))?;
        self.remove_connection_info()?;
        if !status.success() {
            anyhow::bail!("Server exited with {status}");
        }
        Ok(())
    }
}
