use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::Query, extract::State, response::IntoResponse, Json};
use postroom_core::constants::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use postroom_core::{Paginated, RecipientResponse};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

#[utoipa::path(
    get,
    path = "/api/v0/recipients",
    tag = "recipients",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of recipients owned by the caller", body = Paginated<RecipientResponse>),
        (status = 401, description = "Missing or invalid access key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_recipients(
    State(state): State<Arc<AppState>>,
    user_ctx: UserContext,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = query.page.max(1);
    let per_page = query.per_page.clamp(1, MAX_PER_PAGE);

    let recipients = state
        .db
        .recipient_repository
        .list_recipients(user_ctx.user_id, page, per_page)
        .await?;

    Ok(Json(recipients.map(RecipientResponse::from)))
}
