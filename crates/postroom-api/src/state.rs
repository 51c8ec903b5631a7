//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what they need
//! via Axum's `FromRef`, and to avoid a single god object with duplicate repositories.

use crate::services::RecipientIntakeService;
use postroom_core::Config;
use postroom_db::{RecipientRepository, UserRepository};
use postroom_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

// ----- Sub-state types -----

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub recipient_repository: RecipientRepository,
    pub user_repository: UserRepository,
    pub database: DatabaseConfig,
}

/// Limits and allowlists for recipient document uploads.
#[derive(Clone, Debug)]
pub struct DocumentConfig {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

/// Security configuration (CORS).
#[derive(Clone)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
}

#[derive(Clone)]
#[allow(dead_code)] // Used via FromRef and in setup::services
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub documents: DocumentConfig,
    pub security: SecurityConfig,
    pub storage: Arc<dyn Storage>,
    pub intake: RecipientIntakeService,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for DocumentConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.documents.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for SecurityConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.security.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
