//! Simplification cache operations
//!
//! Entries are keyed by a SHA-256 fingerprint of the level, model and source
//! text. Writes are upserts, so concurrent writers to one key end with the
//! last write.

use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

use crate::error::Result;

/// Compute the cache fingerprint for a (text, level, model) triple
pub fn compute_key(text: &str, level: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(level.as_bytes());
    hasher.update(b"\n");
    hasher.update(model.as_bytes());
    hasher.update(b"\n");
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Persistent cache of simplified texts
#[derive(Clone)]
pub struct ResultCache {
    pool: SqlitePool,
}

impl ResultCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a previously stored simplification
    pub async fn get(&self, text: &str, level: &str, model: &str) -> Result<Option<String>> {
        let key = compute_key(text, level, model);

        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value FROM simplification_cache WHERE key = ?
            "#,
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await?;

        tracing::debug!(key = %key, hit = value.is_some(), "Cache lookup");

        Ok(value)
    }

    /// Insert or replace a simplification
    pub async fn put(&self, text: &str, level: &str, model: &str, value: &str) -> Result<()> {
        let key = compute_key(text, level, model);
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO simplification_cache (key, value, level, model, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&key)
        .bind(value)
        .bind(level)
        .bind(model)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(key = %key, level = %level, model = %model, "Cached simplification");

        Ok(())
    }

    /// Number of stored entries
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM simplification_cache")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
