use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use postroom_core::{AppError, RecipientResponse};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/recipients/{id}",
    tag = "recipients",
    params(
        ("id" = Uuid, Path, description = "Recipient ID")
    ),
    responses(
        (status = 200, description = "Recipient found", body = RecipientResponse),
        (status = 404, description = "Recipient not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_recipient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let recipient = state
        .db
        .recipient_repository
        .get_recipient(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

    Ok(Json(RecipientResponse::from(recipient)))
}
