//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub version: String,
    /// `None` when the cache store cannot be read
    pub cache_entries: Option<i64>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_entries = match state.simplifier().cache().count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read cache");
            None
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache_entries,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
