//! Model providers
//!
//! Defines the model trait and the Gemini REST implementation.

use async_trait::async_trait;
use serde::Deserialize;

use super::types::{ModelError, ModelInfo};
use crate::config::ProviderConfig;

/// Generative text model
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Identifier used in cache fingerprints and `/health`
    fn model_name(&self) -> &str;

    /// Complete a prompt. `Ok(None)` means the provider returned no text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError>;

    /// List the provider's model catalog
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError>;
}

/// Google Gemini provider (Generative Language REST API)
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

/// Header carrying the API key, keeping it out of request URLs
const API_KEY_HEADER: &str = "x-goog-api-key";

impl GeminiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Map a transport error, reporting the client-side timeout as a model timeout
    fn request_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.timeout_secs)
        } else {
            ModelError::from(err)
        }
    }

    /// Model path segment; the catalog reports names as "models/<id>"
    fn model_path(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<CatalogModel>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

/// Concatenated text parts of the first candidate
fn completion_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ModelError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ModelError::Status { status, body })
}

#[async_trait]
impl TextModel for GeminiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        let url = format!("{}/v1beta/{}:generateContent", self.base_url, self.model_path());

        let request = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let parsed: GenerateResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| self.request_error(e))?;
        Ok(completion_text(parsed))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).header(API_KEY_HEADER, &self.api_key);
            if let Some(ref token) = page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let response = request.send().await.map_err(|e| self.request_error(e))?;
            let page: ListModelsResponse = check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| self.request_error(e))?;

            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: m.name,
                supports: m.supported_generation_methods,
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = models.len(), "Fetched model catalog");
        Ok(models)
    }
}

/// Mock model for testing
#[cfg(test)]
pub struct MockModel {
    pub name: String,
    pub response: Result<Option<String>, ModelError>,
    pub delay: std::time::Duration,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockModel {
    pub fn replying(text: &str) -> Self {
        Self {
            name: "mock-model".to_string(),
            response: Ok(Some(text.to_string())),
            delay: std::time::Duration::ZERO,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl TextModel for MockModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> Result<Option<String>, ModelError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        Ok(vec![ModelInfo {
            name: format!("models/{}", self.name),
            supports: vec!["generateContent".to_string()],
        }])
    }
}
