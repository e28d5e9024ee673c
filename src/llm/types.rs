//! Model collaborator types

use serde::{Deserialize, Serialize};

/// Catalog entry reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Provider model name, e.g. "models/gemini-1.5-flash"
    pub name: String,
    /// Supported generation methods
    pub supports: Vec<String>,
}

/// Model call errors
///
/// Cloneable so one failed call can be handed to every coalesced waiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Model call timed out after {0} seconds")]
    Timeout(u64),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs never reach logs or response bodies
        let err = err.without_url();
        if err.is_decode() {
            ModelError::Malformed(err.to_string())
        } else {
            ModelError::Request(err.to_string())
        }
    }
}
