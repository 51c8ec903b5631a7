//! Storage setup and initialization

use anyhow::{Context, Result};
use postroom_core::Config;
use postroom_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Setup local filesystem storage rooted at the configured path.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(path = %config.storage_path(), "Initializing document storage...");
    let storage = LocalStorage::new(config.storage_path())
        .await
        .context("Failed to initialize document storage")?;
    tracing::info!("Document storage initialized successfully");

    Ok(Arc::new(storage))
}
