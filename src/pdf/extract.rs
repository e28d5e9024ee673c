//! MuPDF-backed text extraction

use mupdf::Document;
use thiserror::Error;
use tokio::time::{timeout, Duration};

/// Timeout for opening and reading an uploaded PDF
const EXTRACT_TIMEOUT_SECS: u64 = 30;

/// Declared content types accepted for upload
pub const PDF_CONTENT_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];

/// PDF extraction errors
#[derive(Error, Debug)]
pub enum PdfExtractError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Could not read PDF: {0}")]
    Unreadable(String),

    #[error("No extractable text found")]
    NoText,

    #[error("PDF extraction timed out after {0} seconds")]
    Timeout(u64),
}

impl From<mupdf::Error> for PdfExtractError {
    fn from(err: mupdf::Error) -> Self {
        PdfExtractError::Unreadable(err.to_string())
    }
}

/// Whether a declared content type is acceptable, ignoring case and parameters
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    PDF_CONTENT_TYPES.contains(&essence.as_str())
}

/// Extract the text of every page, skipping pages without text
pub async fn extract_text(data: Vec<u8>) -> Result<String, PdfExtractError> {
    let size = data.len();

    // MuPDF parsing is CPU-bound; keep it off the async runtime
    let result = timeout(
        Duration::from_secs(EXTRACT_TIMEOUT_SECS),
        tokio::task::spawn_blocking(move || extract_pages(&data)),
    )
    .await;

    let pages = match result {
        Ok(join_result) => join_result
            .map_err(|e| PdfExtractError::Unreadable(format!("Task join error: {}", e)))??,
        Err(_) => return Err(PdfExtractError::Timeout(EXTRACT_TIMEOUT_SECS)),
    };

    if pages.is_empty() {
        return Err(PdfExtractError::NoText);
    }

    tracing::debug!(bytes = size, pages_with_text = pages.len(), "Extracted PDF text");
    Ok(pages.join("\n\n"))
}

fn extract_pages(data: &[u8]) -> Result<Vec<String>, PdfExtractError> {
    let doc = Document::from_bytes(data, "application/pdf")?;
    let page_count = doc.page_count()?;
    if page_count <= 0 {
        return Err(PdfExtractError::Unreadable("document has no pages".to_string()));
    }

    let mut pages = Vec::new();
    for index in 0..page_count {
        let page = doc.load_page(index)?;
        let text = page.to_text()?;
        let text = text.trim();
        if !text.is_empty() {
            pages.push(text.to_string());
        }
    }

    Ok(pages)
}
