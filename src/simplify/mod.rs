//! Simplification orchestration
//!
//! Resolves the level, consults the result cache, calls the model on a miss
//! and assembles readability metrics and the inline diff.

mod service;
mod types;

pub use service::Simplifier;
pub use types::{LevelInfo, SimplifyRequest, SimplifyResponse};
