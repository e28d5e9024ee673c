//! PDF upload endpoint

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::pdf::{extract_text, is_pdf_content_type, PdfExtractError};
use crate::state::AppState;

/// Largest accepted upload
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract_pdf", post(extract_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /extract_pdf
///
/// Expects a multipart field named `file` (or `pdf`).
async fn extract_pdf(mut multipart: Multipart) -> Result<Json<ExtractResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" && name != "pdf" {
            continue;
        }

        let content_type = field.content_type().map(|s| s.to_string());
        let file_name = field.file_name().map(|s| s.to_string());
        tracing::debug!(?file_name, ?content_type, "Received PDF upload");

        if !is_pdf_content_type(content_type.as_deref()) {
            return Err(PdfExtractError::UnsupportedContentType(
                content_type.unwrap_or_else(|| "none".to_string()),
            )
            .into());
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

        let text = extract_text(data.to_vec()).await?;
        tracing::info!(?file_name, chars = text.len(), "Extracted text from PDF");

        return Ok(Json(ExtractResponse { text }));
    }

    Err(AppError::BadRequest(
        "No file provided. Use field name 'file' or 'pdf'".to_string(),
    ))
}
