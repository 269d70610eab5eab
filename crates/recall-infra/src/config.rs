//! Server configuration loader for Recall Stack.
//!
//! Reads a TOML file into [`ServerConfig`]. The implicit `recall_stack.toml`
//! in the working directory is optional and falls back to defaults; a file
//! named explicitly on the command line must exist and parse.

use std::path::Path;

use recall_types::config::ServerConfig;
use recall_types::error::ConfigError;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "recall_stack.toml";

/// Load the server configuration.
///
/// - `Some(path)`: the file must exist and parse, otherwise [`ConfigError`].
/// - `None`: reads [`DEFAULT_CONFIG_FILE`] if present. A missing file yields
///   [`ServerConfig::default()`]; an unreadable or malformed one logs a
///   warning and yields the default.
pub async fn load_server_config(explicit: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    match explicit {
        Some(path) => load_required(path).await,
        None => Ok(load_optional(Path::new(DEFAULT_CONFIG_FILE)).await),
    }
}

async fn load_required(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

async fn load_optional(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} found, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_required_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("recall.toml");
        tokio::fs::write(
            &config_path,
            r#"
host = "127.0.0.1"
port = 9000
default_recall_limit = 20
"#,
        )
        .await
        .unwrap();

        let config = load_server_config(Some(&config_path)).await.unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.default_recall_limit, 20);
        assert_eq!(config.database_path, "recall_stack.db");
    }

    #[tokio::test]
    async fn load_required_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_server_config(Some(&tmp.path().join("absent.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn load_required_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("recall.toml");
        tokio::fs::write(&config_path, "port = \"not a number\"")
            .await
            .unwrap();

        let err = load_server_config(Some(&config_path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_optional_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_optional(&tmp.path().join("recall_stack.toml")).await;
        assert_eq!(config, ServerConfig::default());
    }

    #[tokio::test]
    async fn load_optional_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("recall_stack.toml");
        tokio::fs::write(&config_path, "this is not valid toml [[[")
            .await
            .unwrap();

        let config = load_optional(&config_path).await;
        assert_eq!(config, ServerConfig::default());
    }
}
