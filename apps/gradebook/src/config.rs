//! # Configuration
//!
//! Settings come from, lowest precedence first:
//! 1. Built-in defaults
//! 2. A TOML file (`--config <path>`, else `gradebook.toml` if present)
//! 3. Environment variables (`GRADEBOOK_RATE_LIMIT`, `GRADEBOOK_CORS_ORIGINS`)
//! 4. CLI flags (applied by the `cli` module)
//!
//! ## File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//! cors_origins = ["http://localhost:3000"]
//! body_limit_bytes = 65536
//!
//! [storage]
//! backend = "redb"
//! database = "gradebook.redb"
//! ```

use gradebook_core::GradebookError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "gradebook.toml";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients, 0 disables limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. Empty means localhost only, `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            cors_origins: Vec::new(),
            body_limit_bytes: 64 * 1024,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// redb database file.
    #[default]
    Redb,
    /// Volatile in-memory store.
    Memory,
}

impl std::str::FromStr for BackendKind {
    type Err = GradebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "memory" => Ok(Self::Memory),
            other => Err(GradebookError::InvalidRequest(format!(
                "Unknown backend '{}', expected 'redb' or 'memory'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redb => f.write_str("redb"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redb,
            database: PathBuf::from("gradebook.redb"),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, GradebookError> {
        toml::from_str(text).map_err(|e| GradebookError::DeserializationError(e.to_string()))
    }

    /// Load configuration from `path`, or from [`DEFAULT_CONFIG_FILE`] when it
    /// exists, then apply environment overrides.
    ///
    /// An explicitly given path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, GradebookError> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, GradebookError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GradebookError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&text)
    }

    /// Apply `GRADEBOOK_RATE_LIMIT` and `GRADEBOOK_CORS_ORIGINS` overrides.
    fn apply_env(&mut self) {
        if let Some(limit) = std::env::var("GRADEBOOK_RATE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.server.rate_limit = limit;
        }
        if let Ok(origins) = std::env::var("GRADEBOOK_CORS_ORIGINS") {
            self.server.cors_origins = parse_origin_list(&origins);
        }
    }
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origin_list(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.rate_limit, 100);
        assert_eq!(config.storage.backend, BackendKind::Redb);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090
            cors_origins = ["*"]

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.storage.backend, BackendKind::Memory);
        assert_eq!(config.storage.database, PathBuf::from("gradebook.redb"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = AppConfig::from_toml("[server]\nprot = 1\n");
        assert!(matches!(result, Err(GradebookError::DeserializationError(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(GradebookError::IoError(_))));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "[storage]\ndatabase = \"school.redb\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.storage.database, PathBuf::from("school.redb"));
    }

    #[test]
    fn backend_kind_parses() {
        assert_eq!("REDB".parse::<BackendKind>().unwrap(), BackendKind::Redb);
        assert_eq!("memory".parse::<BackendKind>().unwrap(), BackendKind::Memory);
        assert!("file".parse::<BackendKind>().is_err());
    }

    #[test]
    fn origin_list_parsing() {
        assert_eq!(
            parse_origin_list("http://a.test, ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origin_list("").is_empty());
    }
}
