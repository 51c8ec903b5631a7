//! Recipient intake workflow: validate, store, inspect, classify, persist.

use crate::auth::models::UserContext;
use crate::services::pdf::PdfInspector;
use crate::state::DocumentConfig;
use crate::utils::upload::{validate_document_upload, UploadedFile};
use postroom_core::{AppError, FinishType, Recipient, RecipientInput};
use postroom_db::RecipientRepository;
use postroom_storage::{document_key, Storage};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Orchestrates the recipient intake pipeline.
///
/// Create and file-replacing update follow the same sequence: validate the
/// typed input, store the new bytes, derive page count and finish type from
/// the stored file, then persist the row. File metadata columns are never
/// written independently of each other.
#[derive(Clone)]
pub struct RecipientIntakeService {
    recipients: RecipientRepository,
    storage: Arc<dyn Storage>,
    inspector: PdfInspector,
    documents: DocumentConfig,
}

impl RecipientIntakeService {
    pub fn new(
        recipients: RecipientRepository,
        storage: Arc<dyn Storage>,
        documents: DocumentConfig,
    ) -> Self {
        Self {
            recipients,
            storage,
            inspector: PdfInspector::new(),
            documents,
        }
    }

    /// Create a recipient from validated form fields and an uploaded document.
    ///
    /// If the row insert fails after the file was stored, the stored file is
    /// deleted best-effort so it does not linger as an orphan.
    #[tracing::instrument(skip(self, input, file), fields(user_id = %ctx.user_id))]
    pub async fn create(
        &self,
        ctx: &UserContext,
        input: RecipientInput,
        file: UploadedFile,
    ) -> Result<Recipient, AppError> {
        let input = input.normalized();
        input.validate()?;
        let extension = validate_document_upload(&file, &self.documents)?;

        let storage_key = document_key(&extension);
        let file_size = file.data.len() as i64;
        self.storage
            .upload(&storage_key, file.data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to store uploaded file: {}", e)))?;

        let file_pages = self.inspect_stored(&storage_key).await;
        let finish_type = FinishType::from_page_count(file_pages);

        match self
            .recipients
            .create_recipient(ctx.user_id, &input, &storage_key, file_size, file_pages, finish_type)
            .await
        {
            Ok(recipient) => Ok(recipient),
            Err(e) => {
                self.cleanup_orphan(storage_key);
                Err(e)
            }
        }
    }

    /// Update a recipient's address fields, optionally replacing its document.
    ///
    /// Without a file only the address fields change. With a file, the new
    /// bytes are stored and the row committed before the replaced file is
    /// deleted, so a failure mid-way never loses both files.
    #[tracing::instrument(skip(self, input, file), fields(recipient_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        input: RecipientInput,
        file: Option<UploadedFile>,
    ) -> Result<Recipient, AppError> {
        let input = input.normalized();
        input.validate()?;

        let Some(file) = file else {
            return self.recipients.update_recipient(id, &input).await;
        };

        let existing = self
            .recipients
            .get_recipient(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let extension = validate_document_upload(&file, &self.documents)?;
        let storage_key = document_key(&extension);
        let file_size = file.data.len() as i64;
        self.storage
            .upload(&storage_key, file.data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to store uploaded file: {}", e)))?;

        let file_pages = self.inspect_stored(&storage_key).await;
        let finish_type = FinishType::from_page_count(file_pages);

        let updated = match self
            .recipients
            .update_recipient_with_file(id, &input, &storage_key, file_size, file_pages, finish_type)
            .await
        {
            Ok(recipient) => recipient,
            Err(e) => {
                self.cleanup_orphan(storage_key);
                return Err(e);
            }
        };

        if existing.file_path != updated.file_path {
            if let Err(e) = self.storage.delete(&existing.file_path).await {
                tracing::warn!(
                    error = %e,
                    storage_key = %existing.file_path,
                    "Failed to delete replaced document"
                );
            }
        }

        Ok(updated)
    }

    /// Delete a recipient row and its stored document.
    ///
    /// The row deletion stands even when the file removal fails; a file that
    /// is already gone is a no-op at the storage layer.
    #[tracing::instrument(skip(self), fields(recipient_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .recipients
            .get_recipient(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let deleted = self.recipients.delete_recipient(id).await?;
        if !deleted {
            return Err(AppError::NotFound("Recipient not found".to_string()));
        }

        if let Err(e) = self.storage.delete(&existing.file_path).await {
            tracing::warn!(
                error = %e,
                storage_key = %existing.file_path,
                "Failed to delete stored document for removed recipient"
            );
        }

        Ok(())
    }

    /// Page count of the freshly stored file; parse failures downgrade to
    /// an absent count instead of aborting the request.
    async fn inspect_stored(&self, storage_key: &str) -> Option<i32> {
        match self
            .inspector
            .count_pages(self.storage.as_ref(), storage_key)
            .await
        {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    storage_key = %storage_key,
                    "Could not determine page count, storing without one"
                );
                None
            }
        }
    }

    fn cleanup_orphan(&self, storage_key: String) {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(cleanup_err) = storage.delete(&storage_key).await {
                tracing::warn!(
                    error = %cleanup_err,
                    storage_key = %storage_key,
                    "Failed to clean up stored file after database error"
                );
            }
        });
    }
}
