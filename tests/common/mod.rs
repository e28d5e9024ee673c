//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tempfile::TempDir;

use simplify_server::db::{create_pool, ResultCache};
use simplify_server::llm::{ModelError, ModelInfo, TextModel};
use simplify_server::routes;
use simplify_server::simplify::Simplifier;
use simplify_server::state::AppState;

pub const FAKE_MODEL: &str = "fake-model";

/// Model double that records calls and replies with a fixed result
pub struct FakeModel {
    pub reply: Result<Option<String>, ModelError>,
    pub calls: AtomicUsize,
    pub prompts: parking_lot::Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(Some(text.to_string())),
            calls: AtomicUsize::new(0),
            prompts: parking_lot::Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: ModelError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            prompts: parking_lot::Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextModel for FakeModel {
    fn model_name(&self) -> &str {
        FAKE_MODEL
    }

    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        self.reply.clone()
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        self.reply.as_ref().map_err(Clone::clone)?;
        Ok(vec![
            ModelInfo {
                name: format!("models/{}", FAKE_MODEL),
                supports: vec!["generateContent".to_string(), "countTokens".to_string()],
            },
            ModelInfo {
                name: "models/embedding-001".to_string(),
                supports: vec!["embedContent".to_string()],
            },
        ])
    }
}

/// Full application router backed by a fresh on-disk cache
pub async fn test_app(model: Arc<FakeModel>) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("cache.sqlite").display());
    let pool = create_pool(&url).await.unwrap();

    let simplifier = Simplifier::new(model, ResultCache::new(pool), Duration::from_secs(5));
    (routes::app(AppState::new(simplifier)), dir)
}

/// Build a PDF with one Helvetica text line per page (empty string = blank page)
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 4 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    for (i, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R \
             /Resources << /Font << /F1 3 0 R >> >> >>",
            5 + 2 * i
        ));
        let stream = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", text)
        };
        objects.push(format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.into_bytes()
}
