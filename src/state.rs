//! Application state management

use std::sync::Arc;

use crate::simplify::Simplifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    simplifier: Simplifier,
}

impl AppState {
    /// Create a new application state
    pub fn new(simplifier: Simplifier) -> Self {
        Self {
            inner: Arc::new(AppStateInner { simplifier }),
        }
    }

    /// Get the simplification service
    pub fn simplifier(&self) -> &Simplifier {
        &self.inner.simplifier
    }

    /// Identifier of the configured model
    pub fn model_name(&self) -> &str {
        self.inner.simplifier.model().model_name()
    }
}
