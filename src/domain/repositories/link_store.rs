//! Storage trait for link records.

use crate::domain::entities::LinkRecord;
use crate::domain::error::LinkError;
use async_trait::async_trait;

/// Durable storage and atomic mutation of [`LinkRecord`]s.
///
/// Operations on distinct codes must never block each other, and
/// [`LinkStore::find_and_increment`] must be a single indivisible step in the
/// backing store so that concurrent redirects never lose an increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::RedisLinkStore`] - Redis with Lua scripts
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process, non-durable
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persists a new record with `clicks = 0` and the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::DuplicateCode`] if `code` is already stored; no
    /// record is written in that case.
    /// Returns [`LinkError::StoreUnavailable`] on storage failures.
    async fn insert(&self, code: &str, original_url: &str) -> Result<LinkRecord, LinkError>;

    /// Atomically increments the click counter and returns the
    /// post-increment record.
    ///
    /// Returns `Ok(None)` without creating anything when `code` is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failures.
    async fn find_and_increment(&self, code: &str) -> Result<Option<LinkRecord>, LinkError>;

    /// Read-only lookup by short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, LinkError>;

    /// Returns every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failures.
    async fn list_all(&self) -> Result<Vec<LinkRecord>, LinkError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
