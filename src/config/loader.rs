//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, StorageBackend};

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```text
/// server:
///   bind_address: "127.0.0.1:8080"
/// storage:
///   backend: sqlite      # or memory
///   path: "./data/salary.db"
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/salary-engine.yaml").unwrap();
/// println!("Listening on {}", loader.config().server.bind_address);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid YAML, or the SQLite
    ///   backend is selected without a `storage.path`
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text; `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        if config.storage.backend == StorageBackend::Sqlite && config.storage.path.is_none() {
            return Err(EngineError::ConfigParseError {
                path: origin.to_string(),
                message: "storage.path is required for the sqlite backend".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
