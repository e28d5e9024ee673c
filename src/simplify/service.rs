//! Simplification service
//!
//! Concurrent requests for the same (text, level, model) share a single model
//! call and a single cache write.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::time::timeout;

use super::types::SimplifyResponse;
use crate::db::{compute_key, ResultCache};
use crate::diff::diff_markup;
use crate::error::{AppError, Result};
use crate::levels::SimplificationLevel;
use crate::llm::{ModelError, TextModel};
use crate::readability::{fkgl, length_ratio, word_count};

type Completion = Shared<BoxFuture<'static, std::result::Result<String, ModelError>>>;

/// Cache-aware orchestrator around the model collaborator
#[derive(Clone)]
pub struct Simplifier {
    inner: Arc<SimplifierInner>,
}

struct SimplifierInner {
    model: Arc<dyn TextModel>,
    cache: ResultCache,
    model_timeout: Duration,
    /// Model calls in progress, by cache key
    in_flight: Mutex<HashMap<String, Completion>>,
}

impl Simplifier {
    pub fn new(model: Arc<dyn TextModel>, cache: ResultCache, model_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(SimplifierInner {
                model,
                cache,
                model_timeout,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn model(&self) -> &Arc<dyn TextModel> {
        &self.inner.model
    }

    pub fn cache(&self) -> &ResultCache {
        &self.inner.cache
    }

    /// Simplify `text` at `level`, where unknown levels mean intermediate
    pub async fn simplify(&self, text: &str, level: &str) -> Result<SimplifyResponse> {
        let level = SimplificationLevel::from_lenient(level);

        if word_count(text) == 0 {
            return Err(AppError::BadRequest(
                "text must contain at least one word".to_string(),
            ));
        }

        let simplified = match self.cached(text, level).await {
            Some(simplified) => simplified,
            None => self.complete(text, level).await?,
        };

        let fkgl_before = fkgl(text).map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(SimplifyResponse {
            fkgl_before,
            fkgl_after: fkgl(&simplified).ok(),
            length_ratio: length_ratio(text, &simplified),
            inline_diff_html: diff_markup(text, &simplified),
            simplified,
        })
    }

    /// Cached simplification; store errors and empty values count as misses
    async fn cached(&self, text: &str, level: SimplificationLevel) -> Option<String> {
        let model = self.inner.model.model_name();
        match self.inner.cache.get(text, level.as_str(), model).await {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    /// Run the model, joining an identical call already in progress.
    ///
    /// The call runs on its own task, so it completes and leaves the in-flight
    /// map even when every waiting request is dropped.
    async fn complete(&self, text: &str, level: SimplificationLevel) -> Result<String> {
        let key = compute_key(text, level.as_str(), self.inner.model.model_name());

        let completion = {
            let mut in_flight = self.inner.in_flight.lock();
            match in_flight.get(&key) {
                Some(existing) => {
                    tracing::debug!(key = %key, "Joining in-flight simplification");
                    existing.clone()
                }
                None => {
                    let inner = self.inner.clone();
                    let text = text.to_string();
                    let task_key = key.clone();
                    // The entry is inserted under the lock before the task can remove it
                    let handle = tokio::spawn(async move {
                        let result = Self::generate(inner.clone(), text, level).await;
                        inner.in_flight.lock().remove(&task_key);
                        result
                    });

                    let completion = handle
                        .map(|joined| {
                            joined.unwrap_or_else(|e| {
                                Err(ModelError::Request(format!("Model task failed: {}", e)))
                            })
                        })
                        .boxed()
                        .shared();
                    in_flight.insert(key, completion.clone());
                    completion
                }
            }
        };

        completion.await.map_err(AppError::from)
    }

    async fn generate(
        inner: Arc<SimplifierInner>,
        text: String,
        level: SimplificationLevel,
    ) -> std::result::Result<String, ModelError> {
        let model_name = inner.model.model_name().to_string();
        let prompt = level.prompt(&text);
        let started = Instant::now();

        let completion = match timeout(inner.model_timeout, inner.model.generate(&prompt)).await {
            Ok(result) => result?,
            Err(_) => return Err(ModelError::Timeout(inner.model_timeout.as_secs())),
        };
        let simplified = completion.unwrap_or_default().trim().to_string();

        tracing::info!(
            level = %level,
            model = %model_name,
            input_words = word_count(&text),
            output_words = word_count(&simplified),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Model simplification complete"
        );

        if let Err(e) = inner
            .cache
            .put(&text, level.as_str(), &model_name, &simplified)
            .await
        {
            tracing::warn!(error = %e, "Cache write failed, continuing without caching");
        }

        Ok(simplified)
    }
}
