pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::store::disk::DiskStore;
use crate::store::memory::MemoryStore;
use crate::store::{KeyValueStore, Session};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Commands the application can execute.
#[derive(Debug)]
pub enum AppCommand {
    Costs,
    Pricing {
        market_size: Option<f64>,
        export: Option<PathBuf>,
    },
    Insights {
        recommendations: bool,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("costwise starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let session = Session::new(open_store(&config));

    match command {
        AppCommand::Costs => cli::costs::run(&config, &session).await,
        AppCommand::Pricing {
            market_size,
            export,
        } => cli::pricing::run(&config, &session, market_size, export.as_deref()).await,
        AppCommand::Insights { recommendations } => {
            cli::insights::run(&config, &session, recommendations).await
        }
    }
}

// The session survives in the data directory between runs; when that is not
// available the run still works with a throwaway in-memory session.
fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    let path = match config.default_data_path() {
        Ok(path) => path.join("session"),
        Err(e) => {
            warn!("Could not determine data directory: {e}");
            return Arc::new(MemoryStore::new());
        }
    };

    match DiskStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Falling back to in-memory session store: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}
