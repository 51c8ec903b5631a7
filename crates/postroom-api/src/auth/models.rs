use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

/// Authenticated user extracted from the access key and stored in request extensions.
///
/// Threaded explicitly through workflow calls; there is no ambient
/// current-user lookup anywhere in the service.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub name: String,
}

// Implement FromRequestParts for UserContext to work with Multipart
// Extension cannot be used with Multipart, so we extract directly from request parts
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        error: "Missing user context".to_string(),
                        details: None,
                        error_type: None,
                        code: "MISSING_USER_CONTEXT".to_string(),
                        recoverable: false,
                        suggested_action: Some(
                            "Check the access key supplied in the Authorization header"
                                .to_string(),
                        ),
                    }),
                )
            })
    }
}
