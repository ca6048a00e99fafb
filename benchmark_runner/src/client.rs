//!
//! The benchmark client.
//!

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::environment::Environment;
use crate::process;
use crate::server::connection::Connection;

///
/// Runs a client program against the server.
///
pub trait Client {
    ///
    /// Runs the client script and returns its output.
    ///
    /// The script receives the server host and port, followed by the
    /// forwarded arguments unchanged.
    ///
    fn run(
        &mut self,
        script: &Path,
        connection: &Connection,
        arguments: &[String],
    ) -> anyhow::Result<String>;
}

///
/// The client which runs a script as a subprocess.
///
#[derive(Debug, Default, Clone)]
pub struct ScriptClient {
    /// The interpreter, if the scripts are not run directly.
    interpreter: Option<PathBuf>,
}

impl ScriptClient {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(interpreter: Option<PathBuf>) -> Self {
        Self { interpreter }
    }

    ///
    /// Creates the client with the interpreter from the environment.
    ///
    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(environment.client_interpreter.clone())
    }

    ///
    /// Builds the client command.
    ///
    pub fn command(&self, script: &Path, connection: &Connection, arguments: &[String]) -> Command {
        let mut command = match self.interpreter.as_deref() {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(script);
                command
            }
            None => Command::new(script),
        };
        command
            .arg(connection.host.as_str())
            .arg(connection.port.to_string())
            .args(arguments);
        command
    }
}

impl Client for ScriptClient {
    fn run(
        &mut self,
        script: &Path,
        connection: &Connection,
        arguments: &[String],
    ) -> anyhow::Result<String> {
        tracing::debug!(script = ?script, "running client");
        process::run(&mut self.command(script, connection, arguments))
            .map_err(|error| error.context(format!("Client {script:?}")))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::path::Path;
    use std::path::PathBuf;

    use super::ScriptClient;
    use crate::server::connection::Connection;

    fn connection() -> Connection {
        Connection::new("node1".to_owned(), 5555)
    }

    #[test]
    fn direct_command() {
        let command = ScriptClient::new(None).command(
            Path::new("/b/stream.py"),
            &connection(),
            &["--size=10".to_owned(), "--trials".to_owned(), "3".to_owned()],
        );
        assert_eq!(command.get_program(), OsStr::new("/b/stream.py"));
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec!["node1", "5555", "--size=10", "--trials", "3"]
        );
    }

    #[test]
    fn interpreted_command() {
        let command = ScriptClient::new(Some(PathBuf::from("python3"))).command(
            Path::new("/b/IO.py"),
            &connection(),
            &[],
        );
        assert_eq!(command.get_program(), OsStr::new("python3"));
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec!["/b/IO.py", "node1", "5555"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn output_is_captured() {
        use crate::client::Client;
        use crate::testing;

        let _lock = testing::lock();
        let directory = tempfile::tempdir().expect("Temporary directory creation");
        let script = testing::script(directory.path(), "noop.py", "echo \"$1:$2 $3\"");

        let output = ScriptClient::default()
            .run(script.as_path(), &connection(), &["-x".to_owned()])
            .expect("Must succeed");
        assert_eq!(output, "node1:5555 -x\n");
    }

    #[cfg(unix)]
    #[test]
    fn failure_names_the_script() {
        use crate::client::Client;
        use crate::testing;

        let _lock = testing::lock();
        let directory = tempfile::tempdir().expect("Temporary directory creation");
        let script = testing::script(directory.path(), "broken.py", "exit 1");

        let error = ScriptClient::default()
            .run(script.as_path(), &connection(), &[])
            .expect_err("Must fail");
        assert!(format!("{error:#}").contains("broken.py"), "{error:#}");
    }
}
