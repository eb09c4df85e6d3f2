//! Schema bootstrap.
//!
//! The schema is a single table created with `IF NOT EXISTS`; there is no
//! versioning and no migration history.

use sqlx::SqlitePool;

use crate::error::{StoreError, StoreResult};

/// Embedded DDL for the `notes` table and its ordering index.
pub const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Create the `notes` table if it does not exist yet.
///
/// Idempotent; runs on every start when `create_schema` is enabled.
pub async fn ensure_schema(pool: &SqlitePool) -> StoreResult<()> {
    tracing::debug!("Ensuring notes schema...");

    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Schema(format!("failed to create notes table: {}", e)))?;

    tracing::info!("Schema ready");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notes` table exists.
pub async fn is_schema_initialized(pool: &SqlitePool) -> StoreResult<bool> {
    let result: (i64,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0 != 0)
}
