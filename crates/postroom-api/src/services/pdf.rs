//! Page counting for stored PDF documents.

use postroom_core::AppError;
use postroom_storage::{Storage, StorageError};

/// Counts pages of stored PDF documents.
#[derive(Clone, Default)]
pub struct PdfInspector;

impl PdfInspector {
    pub fn new() -> Self {
        Self
    }

    /// Count the pages of the document stored under `storage_key`.
    ///
    /// A missing file yields `Ok(None)`, not an error. Bytes that do not
    /// parse as a PDF yield `AppError::PdfParse`; the intake workflow
    /// downgrades that to an absent page count.
    pub async fn count_pages(
        &self,
        storage: &dyn Storage,
        storage_key: &str,
    ) -> Result<Option<i32>, AppError> {
        let data = match storage.download(storage_key).await {
            Ok(data) => data,
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(AppError::Storage(format!("Failed to read stored file: {}", e))),
        };

        // lopdf parsing is CPU-bound; keep it off the async workers.
        let pages = tokio::task::spawn_blocking(move || {
            lopdf::Document::load_mem(&data).map(|document| document.get_pages().len())
        })
        .await
        .map_err(|e| AppError::Internal(format!("Page count task failed: {}", e)))?
        .map_err(|e| AppError::PdfParse(e.to_string()))?;

        Ok(Some(pages as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postroom_storage::LocalStorage;
    use std::sync::Arc;

    fn pdf_with_pages(count: usize) -> Vec<u8> {
        use lopdf::{dictionary, Document, Object};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = (0..count)
            .map(|_| {
                let page_id = doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                });
                Object::Reference(page_id)
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize test pdf");
        bytes
    }

    async fn storage_in(dir: &tempfile::TempDir) -> Arc<dyn Storage> {
        Arc::new(
            LocalStorage::new(dir.path().to_path_buf())
                .await
                .expect("create storage"),
        )
    }

    #[tokio::test]
    async fn counts_pages_of_stored_pdf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = storage_in(&dir).await;
        storage
            .upload("files/three.pdf", pdf_with_pages(3))
            .await
            .expect("upload");

        let inspector = PdfInspector::new();
        let pages = inspector
            .count_pages(storage.as_ref(), "files/three.pdf")
            .await
            .expect("inspect");
        assert_eq!(pages, Some(3));
    }

    #[tokio::test]
    async fn missing_file_is_absent_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = storage_in(&dir).await;

        let inspector = PdfInspector::new();
        let pages = inspector
            .count_pages(storage.as_ref(), "files/nope.pdf")
            .await
            .expect("inspect");
        assert_eq!(pages, None);
    }

    #[tokio::test]
    async fn garbage_bytes_surface_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = storage_in(&dir).await;
        storage
            .upload("files/garbage.pdf", b"not a pdf at all".to_vec())
            .await
            .expect("upload");

        let inspector = PdfInspector::new();
        let result = inspector
            .count_pages(storage.as_ref(), "files/garbage.pdf")
            .await;
        assert!(matches!(result, Err(AppError::PdfParse(_))));
    }
}
