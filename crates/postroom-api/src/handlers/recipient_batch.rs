use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use postroom_core::{AppError, MarkBatchRequest, MarkBatchResponse};
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v0/recipients/batch",
    tag = "recipients",
    request_body = MarkBatchRequest,
    responses(
        (status = 200, description = "Recipients marked as batched", body = MarkBatchResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access key", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn mark_recipients_batched(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<MarkBatchRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let updated = state
        .db
        .recipient_repository
        .mark_in_batch(&request.recipient_ids)
        .await?;

    Ok(Json(MarkBatchResponse { updated }))
}
