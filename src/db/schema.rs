//! Database schema initialization

use sqlx::SqlitePool;

use crate::error::Result;

/// Initialize the database schema
pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA_SQL)
        .execute(pool)
        .await?;

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Simplification cache, keyed by SHA-256 of (level, model, text)
CREATE TABLE IF NOT EXISTS simplification_cache (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    level TEXT NOT NULL,
    model TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cache_model ON simplification_cache(model);
"#;
