//! OpenAPI documentation.
//! All routes live under the fixed prefix in `crate::constants::API_PREFIX`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use postroom_core::models;

/// Returns the OpenAPI spec served at /api/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postroom API",
        version = "0.1.0",
        description = "Mail recipient administration API (v0). Recipients pair a postal address with an uploaded PDF document; the service counts the document's pages on intake and classifies each recipient into a finish type used by the downstream batching flow. All endpoints are versioned under /api/v0/.",
        contact(
            name = "API Support",
            url = "https://github.com/yourusername/postroom"
        )
    ),
    paths(
        // Recipients
        handlers::recipient_create::create_recipient,
        handlers::recipient_get::get_recipient,
        handlers::recipient_list::list_recipients,
        handlers::recipient_update::update_recipient,
        handlers::recipient_delete::delete_recipient,
        handlers::recipient_download::download_recipient_document,
        // Batching
        handlers::recipient_published::published_recipients,
        handlers::recipient_batch::mark_recipients_batched,
    ),
    components(
        schemas(
            // Core models
            models::RecipientResponse,
            models::PublishedRecipient,
            models::FinishType,
            models::MarkBatchRequest,
            models::MarkBatchResponse,
            models::Paginated<models::RecipientResponse>,
            models::Paginated<models::PublishedRecipient>,
            // Query params
            handlers::recipient_list::PaginationQuery,
            handlers::recipient_published::PublishedQuery,
            handlers::recipient_published::PublishedRecipientsResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "recipients", description = "Recipient registration, document intake, and batching operations")
    )
)]
pub struct ApiDoc;
