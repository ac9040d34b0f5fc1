use axum::{extract::Multipart, Json};
use tracing::info;

use crate::codec::{EncodedFile, FileAttachmentCodec, SelectedFile};
use crate::errors::AppError;

/// POST /api/v1/attachments/encode
/// Multipart body with a `file` part and an optional `fileName` text part.
/// When `fileName` is missing or blank the uploaded file's own name is used.
pub async fn handle_encode_attachment(
    mut multipart: Multipart,
) -> Result<Json<EncodedFile>, AppError> {
    let mut file: Option<SelectedFile> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let part = field.name().map(str::to_owned);
        match part.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some(SelectedFile::new(name, bytes));
            }
            Some("fileName") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read fileName: {e}")))?;
                file_name = Some(text);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;
    let mut encoded = FileAttachmentCodec::encode_file(&file);
    if let Some(name) = file_name.filter(|n| !n.trim().is_empty()) {
        encoded.file_name = name;
    }

    info!(
        "Encoded attachment {} ({} bytes)",
        encoded.file_name,
        file.bytes.len()
    );
    Ok(Json(encoded))
}
