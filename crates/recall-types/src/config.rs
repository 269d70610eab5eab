//! Server configuration types for Recall Stack.
//!
//! `ServerConfig` represents the optional `recall_stack.toml` that controls
//! the listen address, the database location and recall defaults.

use serde::{Deserialize, Serialize};

use crate::memory::DEFAULT_RECALL_LIMIT;

/// Top-level configuration. All fields have defaults, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Limit applied to a recall that does not specify one.
    #[serde(default = "default_recall_limit")]
    pub default_recall_limit: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_path() -> String {
    "recall_stack.db".to_string()
}

fn default_recall_limit() -> i64 {
    DEFAULT_RECALL_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_path: default_database_path(),
            default_recall_limit: default_recall_limit(),
        }
    }
}

impl ServerConfig {
    /// `sqlx` connection URL for the configured database file.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_path)
    }

    /// `host:port` for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, "recall_stack.db");
        assert_eq!(config.default_recall_limit, 100);
    }

    #[test]
    fn test_server_config_deserialize_empty() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_server_config_deserialize_partial() {
        let toml_str = r#"
port = 9100
database_path = "/var/lib/recall/memories.db"
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_path, "/var/lib/recall/memories.db");
        assert_eq!(config.default_recall_limit, 100);
    }

    #[test]
    fn test_database_url_and_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: "data/recall.db".to_string(),
            default_recall_limit: 50,
        };
        assert_eq!(config.database_url(), "sqlite://data/recall.db?mode=rwc");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }
}
