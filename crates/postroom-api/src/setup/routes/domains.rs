//! Domain route groups (recipients).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn recipient_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/recipients", API_PREFIX),
            post(handlers::recipient_create::create_recipient),
        )
        .route(
            &format!("{}/recipients", API_PREFIX),
            get(handlers::recipient_list::list_recipients),
        )
        .route(
            &format!("{}/recipients/published", API_PREFIX),
            get(handlers::recipient_published::published_recipients),
        )
        .route(
            &format!("{}/recipients/batch", API_PREFIX),
            post(handlers::recipient_batch::mark_recipients_batched),
        )
        .route(
            &format!("{}/recipients/{{id}}", API_PREFIX),
            get(handlers::recipient_get::get_recipient),
        )
        .route(
            &format!("{}/recipients/{{id}}", API_PREFIX),
            put(handlers::recipient_update::update_recipient),
        )
        .route(
            &format!("{}/recipients/{{id}}", API_PREFIX),
            delete(handlers::recipient_delete::delete_recipient),
        )
        .route(
            &format!("{}/recipients/{{id}}/file", API_PREFIX),
            get(handlers::recipient_download::download_recipient_document),
        )
        .with_state(state)
}
