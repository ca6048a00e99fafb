//!
//! The server connection info.
//!

use std::str::FromStr;

///
/// The address the benchmark clients connect to.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// The server host name.
    pub host: String,
    /// The server port.
    pub port: u16,
}

impl Connection {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    ///
    /// Parses the connection info file content once the server has finished
    /// writing it.
    ///
    /// The content is complete when its first line is newline-terminated or
    /// carries the URL field. A partially written file is rejected, so a
    /// truncated port is never taken for the real one.
    ///
    pub fn from_info_file(content: &str) -> anyhow::Result<Self> {
        let line = match content.split_once('\n') {
            Some((line, _)) => line,
            None if content.split_whitespace().count() >= 3 => content,
            None => anyhow::bail!("Server connection info `{content}` is incomplete"),
        };
        line.parse()
    }
}

impl FromStr for Connection {
    type Err = anyhow::Error;

    ///
    /// Parses the server connection info file content: `<host> <port> [<url>]`.
    ///
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let mut parts = string.split_whitespace();
        let host = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Server connection info is empty"))?;
        let port = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Server connection info `{string}` misses the port"))?;
        let port = port.parse().map_err(|error| {
            anyhow::anyhow!("Server connection info port `{port}` parsing: {error}")
        })?;
        Ok(Self::new(host.to_owned(), port))
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::Connection;

    #[test]
    fn host_and_port() {
        let connection: Connection = "nid00012 5555\n".parse().expect("Must be parsed");
        assert_eq!(connection, Connection::new("nid00012".to_owned(), 5555));
        assert_eq!(connection.to_string(), "nid00012:5555");
    }

    #[test]
    fn with_url() {
        let connection: Connection = "localhost 5556 tcp://localhost:5556"
            .parse()
            .expect("Must be parsed");
        assert_eq!(connection.port, 5556);
    }

    #[test]
    fn info_file_complete() {
        let connection = Connection::from_info_file("nid00012 5555\n").expect("Must be parsed");
        assert_eq!(connection, Connection::new("nid00012".to_owned(), 5555));
        let connection = Connection::from_info_file("localhost 5556 tcp://localhost:5556")
            .expect("Must be parsed");
        assert_eq!(connection.port, 5556);
    }

    #[test]
    fn info_file_partially_written() {
        assert!(Connection::from_info_file("nid00012 55").is_err());
        assert!(Connection::from_info_file("nid00012").is_err());
        assert!(Connection::from_info_file("").is_err());
    }

    #[test]
    fn invalid() {
        assert!("".parse::<Connection>().is_err());
        assert!("localhost".parse::<Connection>().is_err());
        assert!("localhost port".parse::<Connection>().is_err());
    }
}
