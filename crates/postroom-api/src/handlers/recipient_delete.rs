use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/v0/recipients/{id}",
    tag = "recipients",
    params(
        ("id" = Uuid, Path, description = "Recipient ID")
    ),
    responses(
        (status = 204, description = "Recipient deleted"),
        (status = 404, description = "Recipient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(recipient_id = %id, user_id = %user_ctx.user_id))]
pub async fn delete_recipient(
    State(state): State<Arc<AppState>>,
    user_ctx: UserContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.intake.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
