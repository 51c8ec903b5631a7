//! Service initialization and application state setup

use crate::services::RecipientIntakeService;
use crate::state::{AppState, DatabaseConfig, DbState, DocumentConfig, SecurityConfig};
use anyhow::Result;
use postroom_core::Config;
use postroom_db::{RecipientRepository, UserRepository};
use postroom_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Initialize all services and repositories, returning the application state
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let recipient_repository = RecipientRepository::new(pool.clone());
    let user_repository = UserRepository::new(pool.clone());

    let documents = DocumentConfig {
        max_file_size: config.max_document_size_bytes(),
        allowed_extensions: config.document_allowed_extensions().to_vec(),
        allowed_content_types: config.document_allowed_content_types().to_vec(),
    };

    let intake = RecipientIntakeService::new(
        recipient_repository.clone(),
        storage.clone(),
        documents.clone(),
    );

    let is_production = config.is_production();

    tracing::info!(
        max_document_mb = documents.max_file_size / 1024 / 1024,
        is_production,
        "Services initialized"
    );

    let state = Arc::new(AppState {
        db: DbState {
            pool,
            recipient_repository,
            user_repository,
            database: DatabaseConfig {
                max_connections: config.db_max_connections(),
                timeout_seconds: config.db_timeout_seconds(),
            },
        },
        documents,
        security: SecurityConfig {
            cors_origins: config.cors_origins().to_vec(),
        },
        storage,
        intake,
        config: config.clone(),
        is_production,
    });

    Ok(state)
}
