//! Axum route handlers for the Extraction API.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::extractor::extract_pdf_text_async;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// POST /api/v1/extract
///
/// Accepts multipart form data with a `file` field holding a PDF and returns
/// the extracted text, trimmed and truncated to the character limit.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let bytes = read_file_field(multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let text = extract_pdf_text_async(bytes).await?;

    Ok(Json(ExtractResponse { text }))
}

/// Reads the `file` field out of a multipart body, if present.
pub async fn read_file_field(mut multipart: Multipart) -> Result<Option<Bytes>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file field: {e}")))?;
            return Ok(Some(bytes));
        }
    }
    Ok(None)
}
