use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use postroom_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/recipients/{id}/file",
    tag = "recipients",
    params(
        ("id" = Uuid, Path, description = "Recipient ID")
    ),
    responses(
        (status = 200, description = "Stored document bytes", content_type = "application/pdf"),
        (status = 404, description = "Recipient or document not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(recipient_id = %id, operation = "download_recipient_document"))]
pub async fn download_recipient_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let recipient = state
        .db
        .recipient_repository
        .get_recipient(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

    let data = state
        .storage
        .download(&recipient.file_path)
        .await
        .map_err(HttpAppError::from)?;

    let filename = recipient
        .file_path
        .rsplit('/')
        .next()
        .unwrap_or("document.pdf");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
