use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Page count above which a document no longer fits a self-envelopment fold
pub const SELF_ENVELOPMENT_MAX_PAGES: i32 = 5;

/// Mailing finish applied to a recipient's document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "finish_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum FinishType {
    SelfEnvelopment,
    Insertion,
}

impl FinishType {
    /// Classify a document by page count.
    ///
    /// An absent count (missing or unreadable file) is treated as zero pages,
    /// which classifies as self-envelopment.
    pub fn from_page_count(pages: Option<i32>) -> Self {
        match pages {
            None => FinishType::SelfEnvelopment,
            Some(p) if p <= SELF_ENVELOPMENT_MAX_PAGES => FinishType::SelfEnvelopment,
            Some(_) => FinishType::Insertion,
        }
    }
}

/// Recipient entity: a postal destination plus its stored document.
/// `file_pages` and `finish_type` are always derived together from the same
/// file; `postal_code` holds exactly 8 digits with formatting stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Recipient {
    pub id: Uuid,
    pub name: String,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_pages: Option<i32>,
    pub finish_type: FinishType,
    pub in_batch: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address fields submitted on create and update.
/// Call [`RecipientInput::normalized`] before `validate()`: it trims fields,
/// drops blank optionals, and strips formatting from the postal code so the
/// length rule below checks digits only.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct RecipientInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 226,
        message = "Street must be between 1 and 226 characters"
    ))]
    pub street: String,
    #[serde(default)]
    #[validate(length(max = 36, message = "Number must be at most 36 characters"))]
    pub number: Option<String>,
    #[serde(default)]
    #[validate(length(max = 36, message = "Complement must be at most 36 characters"))]
    pub complement: Option<String>,
    #[serde(default)]
    #[validate(length(max = 72, message = "Neighborhood must be at most 72 characters"))]
    pub neighborhood: Option<String>,
    #[validate(length(
        min = 1,
        max = 72,
        message = "City must be between 1 and 72 characters"
    ))]
    pub city: String,
    #[validate(length(min = 2, max = 2, message = "State must be exactly 2 characters"))]
    pub state: String,
    #[validate(length(min = 8, max = 8, message = "Postal code must be exactly 8 digits"))]
    pub postal_code: String,
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl RecipientInput {
    /// Normalize raw form input before validation. Postal code formatting
    /// (dashes, dots, spaces) is stripped here so only digits are stored.
    pub fn normalized(self) -> Self {
        RecipientInput {
            name: self.name.trim().to_string(),
            street: self.street.trim().to_string(),
            number: none_if_blank(self.number),
            complement: none_if_blank(self.complement),
            neighborhood: none_if_blank(self.neighborhood),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self
                .postal_code
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect(),
        }
    }
}

/// Recipient response returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipientResponse {
    pub id: Uuid,
    pub name: String,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_pages: Option<i32>,
    pub finish_type: FinishType,
    pub in_batch: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipient> for RecipientResponse {
    fn from(recipient: Recipient) -> Self {
        RecipientResponse {
            id: recipient.id,
            name: recipient.name,
            street: recipient.street,
            number: recipient.number,
            complement: recipient.complement,
            neighborhood: recipient.neighborhood,
            city: recipient.city,
            state: recipient.state,
            postal_code: recipient.postal_code,
            file_path: recipient.file_path,
            file_size: recipient.file_size,
            file_pages: recipient.file_pages,
            finish_type: recipient.finish_type,
            in_batch: recipient.in_batch,
            user_id: recipient.user_id,
            created_at: recipient.created_at,
            updated_at: recipient.updated_at,
        }
    }
}

/// Published-list row: recipient columns plus the owner's display name,
/// joined in one query to avoid per-row user lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PublishedRecipient {
    pub id: Uuid,
    pub name: String,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_pages: Option<i32>,
    pub finish_type: FinishType,
    pub in_batch: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_name: String,
}

/// Request DTO for marking recipients as included in a mailing batch
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MarkBatchRequest {
    #[validate(length(min = 1, message = "At least one recipient id is required"))]
    pub recipient_ids: Vec<Uuid>,
}

/// Result of a batch-marking request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkBatchResponse {
    /// Number of recipients newly marked; already-batched and unknown ids are skipped
    pub updated: u64,
}
