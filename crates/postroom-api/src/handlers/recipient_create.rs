use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_recipient_form;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use postroom_core::{AppError, RecipientResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/v0/recipients",
    tag = "recipients",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Recipient created", body = RecipientResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_recipient(
    State(state): State<Arc<AppState>>,
    user_ctx: UserContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (input, file) = extract_recipient_form(multipart).await?;
    let file =
        file.ok_or_else(|| AppError::InvalidInput("A PDF document is required".to_string()))?;

    let recipient = state.intake.create(&user_ctx, input, file).await?;

    Ok((StatusCode::CREATED, Json(RecipientResponse::from(recipient))))
}
