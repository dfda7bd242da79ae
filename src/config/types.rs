//! Configuration types for the salary engine service.
//!
//! These structures are deserialized from the YAML configuration file.

use std::path::PathBuf;

use serde::Deserialize;

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Which store backend holds the HR data and salary summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process memory; summaries are lost on restart.
    #[default]
    Memory,
    /// A SQLite database file.
    Sqlite,
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// The backend to use.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Database file, required for [`StorageBackend::Sqlite`].
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}
