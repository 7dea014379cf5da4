//! Local cache: the last known-good content document, stored raw.
//!
//! One row per key; the site uses exactly one, [`CACHE_KEY`]. The document is
//! persisted pre-normalization so later normalization passes still see the
//! original field shapes.

use serde_json::Value;
use sqlx::{Row, SqlitePool};

use crate::core::errors::{AppError, AppResult};

/// Fixed cache key, carried over from the `portfolioContent_v2` storage key of
/// earlier deployments.
pub const CACHE_KEY: &str = "portfolio_content_v2";

pub async fn get_document(pool: &SqlitePool, key: &str) -> AppResult<Option<Value>> {
    let row = sqlx::query("SELECT document FROM content_cache WHERE key = ?1")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let text: String = row.try_get("document")?;
    let document = serde_json::from_str(&text)
        .map_err(|err| AppError::Database(format!("corrupt cached document: {err}")))?;
    Ok(Some(document))
}

pub async fn put_document(pool: &SqlitePool, key: &str, document: &Value) -> AppResult<()> {
    let text = serde_json::to_string(document)?;
    sqlx::query(
        r#"
        INSERT INTO content_cache (key, document)
        VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE
        SET document = excluded.document,
            updated_at = (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#,
    )
    .bind(key)
    .bind(text)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_document(pool: &SqlitePool, key: &str) -> AppResult<bool> {
    let affected = sqlx::query("DELETE FROM content_cache WHERE key = ?1")
        .bind(key)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(affected > 0)
}
