//! Server configuration from command-line flags and environment variables.

use clap::Parser;

/// Runtime configuration for the pizzeria server.
///
/// Every flag can also be set through its `PIZZERIA_*` environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "pizzeria-server", about = "Pizzeria menu catalog HTTP API")]
pub struct ServerConfig {
    /// SQLite database file path.
    #[arg(long, env = "PIZZERIA_DB_PATH", default_value = "pizzeria.db")]
    pub db_path: String,

    /// Interface to listen on.
    #[arg(long, env = "PIZZERIA_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PIZZERIA_PORT", default_value_t = 3231)]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string accepted by `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "pizzeria-server",
            "--db-path",
            "/tmp/menu.db",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
        ])
        .unwrap();
        assert_eq!(config.db_path, "/tmp/menu.db");
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(ServerConfig::try_parse_from(["pizzeria-server", "--port", "pizza"]).is_err());
    }
}
