//! Text Simplifier Server Library
//!
//! Exposes the simplification pipeline for the server binary, integration
//! tests and benchmarks.
//!
//! # Modules
//!
//! - `readability`: Flesch-Kincaid grade level and length ratio
//! - `diff`: word-level diff rendered as inline HTML
//! - `db`: persistent simplification cache
//! - `llm`: model collaborator trait and Gemini provider
//! - `simplify`: cache-aware orchestration
//! - `pdf`: PDF text extraction

pub mod config;
pub mod db;
pub mod diff;
pub mod error;
pub mod levels;
pub mod llm;
pub mod pdf;
pub mod readability;
pub mod routes;
pub mod simplify;
pub mod state;
