//! PDF text extraction
//!
//! Uploaded PDFs are opened with MuPDF on a blocking thread and their
//! per-page text is joined with blank lines.

mod extract;

pub use extract::{extract_text, is_pdf_content_type, PdfExtractError, PDF_CONTENT_TYPES};
