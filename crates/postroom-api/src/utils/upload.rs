//! Multipart extraction and upload validation for recipient forms.

use crate::state::DocumentConfig;
use axum::extract::Multipart;
use postroom_core::{AppError, RecipientInput};

/// A document received in a multipart request, before validation.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Extract recipient form fields and the optional `file` part from a
/// multipart request.
///
/// Only one field named "file" is accepted; multiple file fields are rejected.
/// An empty file part without a filename (a form submitted with no file
/// chosen) counts as no file. Unknown fields are ignored.
pub async fn extract_recipient_form(
    mut multipart: Multipart,
) -> Result<(RecipientInput, Option<UploadedFile>), AppError> {
    let mut input = RecipientInput::default();
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().map(|s: &str| s.to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                if data.is_empty() && filename.as_deref().unwrap_or("").is_empty() {
                    continue;
                }
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }

                file = Some(UploadedFile {
                    data: data.to_vec(),
                    original_filename: filename.unwrap_or_else(|| "unknown".to_string()),
                    content_type: content_type
                        .unwrap_or_else(|| "application/octet-stream".to_string()),
                });
            }
            "name" => input.name = read_text(field, "name").await?,
            "street" => input.street = read_text(field, "street").await?,
            "number" => input.number = Some(read_text(field, "number").await?),
            "complement" => input.complement = Some(read_text(field, "complement").await?),
            "neighborhood" => input.neighborhood = Some(read_text(field, "neighborhood").await?),
            "city" => input.city = read_text(field, "city").await?,
            "state" => input.state = read_text(field, "state").await?,
            "postal_code" => input.postal_code = read_text(field, "postal_code").await?,
            _ => {}
        }
    }

    Ok((input, file))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e)))
}

/// Validate an uploaded document against the configured limits and return
/// its (lowercased) extension.
pub fn validate_document_upload(
    file: &UploadedFile,
    config: &DocumentConfig,
) -> Result<String, AppError> {
    if file.data.is_empty() {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }
    validate_file_size(file.data.len(), config.max_file_size)?;
    validate_content_type(&file.content_type, &config.allowed_content_types)?;
    let extension = validate_file_extension(&file.original_filename, &config.allowed_extensions)?;
    Ok(extension)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "application/pdf; charset=utf-8" -> "application/pdf").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Validate content type against allowlist. Compares normalized MIME type only (no parameter bypass).
pub fn validate_content_type(content_type: &str, allowed_types: &[String]) -> Result<(), AppError> {
    let normalized = normalize_mime_type(content_type).to_lowercase();
    if !allowed_types.iter().any(|ct| normalized == ct.to_lowercase()) {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(())
}

/// Validate file extension
pub fn validate_file_extension(
    filename: &str,
    allowed_extensions: &[String],
) -> Result<String, AppError> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    if !allowed_extensions.contains(&extension) {
        return Err(AppError::InvalidInput(format!(
            "Invalid file extension. Allowed extensions: {}",
            allowed_extensions.join(", ")
        )));
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_config() -> DocumentConfig {
        DocumentConfig {
            max_file_size: 100 * 1024 * 1024,
            allowed_extensions: vec!["pdf".to_string()],
            allowed_content_types: vec!["application/pdf".to_string()],
        }
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = vec!["pdf".to_string()];
        assert_eq!(
            validate_file_extension("letter.pdf", &allowed).unwrap(),
            "pdf"
        );
        assert_eq!(
            validate_file_extension("LETTER.PDF", &allowed).unwrap(),
            "pdf"
        );
        assert!(validate_file_extension("letter.txt", &allowed).is_err());
        assert!(validate_file_extension("letter", &allowed).is_err());
    }

    #[test]
    fn test_validate_content_type_normalizes_parameters() {
        let allowed = vec!["application/pdf".to_string()];
        assert!(validate_content_type("application/pdf", &allowed).is_ok());
        assert!(validate_content_type("application/pdf; charset=binary", &allowed).is_ok());
        assert!(validate_content_type("Application/PDF", &allowed).is_ok());
        assert!(validate_content_type("text/plain", &allowed).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(1024, 2048).is_ok());
        let err = validate_file_size(2049, 2048).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_validate_document_upload_rejects_empty_file() {
        let file = UploadedFile {
            data: vec![],
            original_filename: "letter.pdf".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert!(validate_document_upload(&file, &pdf_config()).is_err());
    }

    #[test]
    fn test_validate_document_upload_returns_extension() {
        let file = UploadedFile {
            data: b"%PDF-1.5".to_vec(),
            original_filename: "Carta.PDF".to_string(),
            content_type: "application/pdf".to_string(),
        };
        assert_eq!(
            validate_document_upload(&file, &pdf_config()).unwrap(),
            "pdf"
        );
    }
}
