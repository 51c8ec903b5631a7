use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::Query, extract::State, response::IntoResponse, Json};
use postroom_core::constants::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use postroom_core::{FinishType, Paginated, PublishedRecipient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PublishedQuery {
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    #[serde(default = "default_bucket_page")]
    pub self_envelopment_page: i64,
    #[serde(default = "default_bucket_page")]
    pub insertion_page: i64,
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

fn default_bucket_page() -> i64 {
    1
}

/// Published recipients split by how their mail piece gets enveloped.
/// Each bucket carries its own page cursor.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublishedRecipientsResponse {
    pub self_envelopment: Paginated<PublishedRecipient>,
    pub insertion: Paginated<PublishedRecipient>,
}

#[utoipa::path(
    get,
    path = "/api/v0/recipients/published",
    tag = "recipients",
    params(PublishedQuery),
    responses(
        (status = 200, description = "Published recipients awaiting batching, bucketed by finish type", body = PublishedRecipientsResponse),
        (status = 401, description = "Missing or invalid access key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn published_recipients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PublishedQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let per_page = query.per_page.clamp(1, MAX_PER_PAGE);
    let self_envelopment_page = query.self_envelopment_page.max(1);
    let insertion_page = query.insertion_page.max(1);

    let self_envelopment = state
        .db
        .recipient_repository
        .list_published(FinishType::SelfEnvelopment, self_envelopment_page, per_page)
        .await?;

    let insertion = state
        .db
        .recipient_repository
        .list_published(FinishType::Insertion, insertion_page, per_page)
        .await?;

    Ok(Json(PublishedRecipientsResponse {
        self_envelopment,
        insertion,
    }))
}
