//! Model catalog endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::llm::ModelInfo;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/models", get(list_models))
}

/// Pass-through of the provider's model catalog
async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<ModelInfo>>> {
    let models = state.simplifier().model().list_models().await?;
    Ok(Json(models))
}
