//! Route modules for the simplifier server

pub mod health;
pub mod models;
pub mod pdf;
pub mod simplify;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(models::router())
        .merge(simplify::router())
        .merge(pdf::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
