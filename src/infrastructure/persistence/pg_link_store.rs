//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::LinkRecord;
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkStore;

/// Primary key constraint backing short code uniqueness.
const CODE_CONSTRAINT: &str = "links_pkey";

#[derive(sqlx::FromRow)]
struct LinkRow {
    short_code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        // The CHECK constraint keeps clicks non-negative.
        let clicks = u64::try_from(row.clicks).unwrap_or_default();
        LinkRecord::new(row.short_code, row.original_url, clicks, row.created_at)
    }
}

/// PostgreSQL-backed link store.
///
/// Click counting relies on a single `UPDATE ... SET clicks = clicks + 1
/// RETURNING` statement, which takes a row lock for the duration of the
/// statement only. Concurrent redirects on one code serialize on that row;
/// other codes are unaffected.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_CONSTRAINT) | None)
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn insert(&self, code: &str, original_url: &str) -> Result<LinkRecord, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (short_code, original_url)
            VALUES ($1, $2)
            RETURNING short_code, original_url, clicks, created_at
            "#,
        )
        .bind(code)
        .bind(original_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                LinkError::DuplicateCode(code.to_string())
            } else {
                LinkError::store(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_and_increment(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING short_code, original_url, clicks, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(LinkError::store)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(LinkError::store)?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, LinkError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM links
            ORDER BY created_at DESC, short_code ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(LinkError::store)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
