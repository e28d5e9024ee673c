//! Language model collaborator
//!
//! The simplifier talks to the model through [`TextModel`] so the HTTP
//! provider can be swapped for a fake in tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simplify_server::llm::{GeminiProvider, TextModel};
//!
//! let model = GeminiProvider::new(&config.provider)?;
//! let completion = model.generate("Simplify: ...").await?;
//! let catalog = model.list_models().await?;
//! ```

mod provider;
mod types;

pub use provider::{GeminiProvider, TextModel};
pub use types::{ModelError, ModelInfo};

#[cfg(test)]
pub use provider::MockModel;
