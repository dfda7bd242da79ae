//! Configuration loading for the salary engine service.
//!
//! The service reads a single YAML file naming the HTTP bind address and the
//! storage backend.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/salary-engine.yaml").unwrap();
//! println!("Storage backend: {:?}", config.config().storage.backend);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, DEFAULT_BIND_ADDRESS, ServerConfig, StorageBackend, StorageConfig};
