//! Simplification endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::levels::SimplificationLevel;
use crate::simplify::{LevelInfo, SimplifyRequest, SimplifyResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/simplify", post(simplify))
        .route("/levels", get(list_levels))
}

/// POST /simplify
///
/// Unknown levels are treated as "intermediate" rather than rejected.
async fn simplify(
    State(state): State<AppState>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>> {
    let response = state
        .simplifier()
        .simplify(&request.text, &request.level)
        .await?;
    Ok(Json(response))
}

/// GET /levels
async fn list_levels() -> Json<Vec<LevelInfo>> {
    Json(SimplificationLevel::ALL.into_iter().map(LevelInfo::from).collect())
}
