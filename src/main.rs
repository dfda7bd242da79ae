//! Salary engine HTTP server.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::SalaryCalculator;
use salary_engine::config::{AppConfig, ConfigLoader, StorageBackend};
use salary_engine::error::{EngineError, EngineResult};
use salary_engine::store::{HrDataset, InMemoryHrStore, SqliteHrStore};

/// Salary engine - computes monthly salaries over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "./config/salary-engine.yaml")]
    config: PathBuf,

    /// JSON dataset of employees, holidays, attendance and adjustments to
    /// load at startup.
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

fn build_calculator(config: &AppConfig, seed: Option<HrDataset>) -> EngineResult<SalaryCalculator> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            let store = InMemoryHrStore::from_dataset(seed.unwrap_or_default());
            Ok(SalaryCalculator::from_store(Arc::new(store)))
        }
        StorageBackend::Sqlite => {
            let path = config
                .storage
                .path
                .as_ref()
                .ok_or_else(|| EngineError::ConfigParseError {
                    path: "storage.path".to_string(),
                    message: "required for the sqlite backend".to_string(),
                })?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| EngineError::dependency("sqlite store", e))?;
            }
            info!(path = %path.display(), "Using SQLite store");

            let store = SqliteHrStore::open(path)?;
            if let Some(dataset) = &seed {
                store.import(dataset)?;
            }
            Ok(SalaryCalculator::from_store(Arc::new(store)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(config = %args.config.display(), "Initializing salary engine");
    let config = ConfigLoader::load(&args.config)?.into_config();

    let seed = match &args.seed {
        Some(path) => {
            let dataset = HrDataset::from_json_file(path)?;
            info!(
                path = %path.display(),
                employees = dataset.employees.len(),
                "Loaded seed dataset"
            );
            Some(dataset)
        }
        None => None,
    };

    let calculator = build_calculator(&config, seed)?;
    let app = create_router(AppState::new(calculator));

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!(address = %config.server.bind_address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
