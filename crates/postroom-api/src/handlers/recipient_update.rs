use crate::auth::models::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_recipient_form;
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use postroom_core::RecipientResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/v0/recipients/{id}",
    tag = "recipients",
    params(
        ("id" = Uuid, Path, description = "Recipient ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Recipient updated", body = RecipientResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Recipient not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(recipient_id = %id, user_id = %user_ctx.user_id))]
pub async fn update_recipient(
    State(state): State<Arc<AppState>>,
    user_ctx: UserContext,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let (input, file) = extract_recipient_form(multipart).await?;

    let recipient = state.intake.update(id, input, file).await?;

    Ok(Json(RecipientResponse::from(recipient)))
}
