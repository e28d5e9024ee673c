//! Error types for the simplifier server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::llm::ModelError;
use crate::pdf::PdfExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfExtractError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status, machine-readable code, client-facing message and retry hint
    fn parts(&self) -> (StatusCode, &'static str, String, Option<bool>) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            AppError::Model(e) => {
                tracing::warn!("Model call failed: {}", e);
                let code = match e {
                    ModelError::Timeout(_) => "model_timeout",
                    _ => "model_unavailable",
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    code,
                    "The language model is unavailable, please retry".to_string(),
                    Some(true),
                )
            }
            AppError::Pdf(e) => match e {
                PdfExtractError::Timeout(_) => {
                    tracing::warn!("PDF extraction timed out: {}", e);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "pdf_timeout",
                        "PDF extraction timed out".to_string(),
                        Some(true),
                    )
                }
                PdfExtractError::UnsupportedContentType(_) => (
                    StatusCode::BAD_REQUEST,
                    "unsupported_content_type",
                    "Only PDF files are supported.".to_string(),
                    None,
                ),
                PdfExtractError::Unreadable(_) => (
                    StatusCode::BAD_REQUEST,
                    "unreadable_pdf",
                    "Could not read PDF file.".to_string(),
                    None,
                ),
                PdfExtractError::NoText => (
                    StatusCode::BAD_REQUEST,
                    "no_text",
                    "No extractable text found in PDF.".to_string(),
                    None,
                ),
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, retryable) = self.parts();

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            retryable,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
