//! Request and response types for simplification

use serde::{Deserialize, Serialize};

use crate::levels::SimplificationLevel;

/// Body of `POST /simplify`
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifyRequest {
    pub text: String,
    /// "basic" | "intermediate" | "advanced"; anything else means intermediate
    #[serde(default)]
    pub level: String,
}

/// Simplified text with readability metrics and inline diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifyResponse {
    pub simplified: String,
    pub fkgl_before: f64,
    /// `None` when the simplified text has no words
    pub fkgl_after: Option<f64>,
    pub length_ratio: f64,
    pub inline_diff_html: String,
}

/// Entry of `GET /levels`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: SimplificationLevel,
    pub description: String,
}

impl From<SimplificationLevel> for LevelInfo {
    fn from(level: SimplificationLevel) -> Self {
        Self {
            level,
            description: level.description().to_string(),
        }
    }
}
