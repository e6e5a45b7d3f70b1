//! Shortening, redirect resolution and analytics.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, error, info, warn};

use crate::domain::entities::LinkRecord;
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkStore;
use crate::utils::code_generator::CodeGenerator;

/// Default number of generate-then-insert attempts per shorten request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default upper bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates the user-facing link workflows on top of a [`LinkStore`].
///
/// Generation and insertion are two separate steps, so a freshly generated
/// code can collide with a stored one. `shorten` treats
/// [`LinkError::DuplicateCode`] as a signal to draw a new code and gives up
/// after a bounded number of attempts.
///
/// Every store call is bounded by a timeout and reported as
/// [`LinkError::StoreUnavailable`] when it expires.
pub struct RedirectService {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
    store_timeout: Duration,
}

impl RedirectService {
    /// Creates a service with default retry and timeout settings.
    pub fn new(store: Arc<dyn LinkStore>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            store,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets how many codes `shorten` tries before giving up. At least one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Creates a short link for `original_url`.
    ///
    /// The URL is stored verbatim. Empty URLs are rejected, and so are URLs
    /// with control characters, which could never be sent back as a
    /// `Location` header.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidUrl`] if the URL is blank or has control characters
    /// - [`LinkError::GeneratorUnavailable`] if no code can be generated
    /// - [`LinkError::CodeSpaceExhausted`] if every attempt collided
    /// - [`LinkError::StoreUnavailable`] on storage failure or timeout
    pub async fn shorten(&self, original_url: &str) -> Result<LinkRecord, LinkError> {
        if original_url.trim().is_empty() || original_url.chars().any(char::is_control) {
            return Err(LinkError::InvalidUrl);
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate()?;

            match self
                .bounded("insert", self.store.insert(&code, original_url))
                .await
            {
                Ok(record) => {
                    counter!("links_created_total").increment(1);
                    info!(code = %record.short_code, attempt, "Short link created");
                    return Ok(record);
                }
                Err(LinkError::DuplicateCode(code)) => {
                    counter!("code_collisions_total").increment(1);
                    warn!(%code, attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            attempts = self.max_attempts,
            "Failed to find a free short code"
        );
        Err(LinkError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Resolves a code to its original URL, counting the visit.
    ///
    /// Returns `Ok(None)` for unknown codes; nothing is created.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failure or timeout.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, LinkError> {
        let record = self
            .bounded("find_and_increment", self.store.find_and_increment(code))
            .await?;

        match record {
            Some(record) => {
                counter!("redirects_total", "result" => "hit").increment(1);
                debug!(code, clicks = record.clicks, "Redirect resolved");
                Ok(Some(record.original_url))
            }
            None => {
                counter!("redirects_total", "result" => "miss").increment(1);
                debug!(code, "Redirect target not found");
                Ok(None)
            }
        }
    }

    /// Returns the record for `code` without counting a visit.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failure or timeout.
    pub async fn get_analytics(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        self.bounded("find_by_code", self.store.find_by_code(code))
            .await
    }

    /// Returns every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] on storage failure or timeout.
    pub async fn get_all_analytics(&self) -> Result<Vec<LinkRecord>, LinkError> {
        self.bounded("list_all", self.store.list_all()).await
    }

    /// Reports whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        tokio::time::timeout(self.store_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, LinkError>>,
    ) -> Result<T, LinkError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Link store call timed out"
                );
                Err(LinkError::StoreUnavailable(format!(
                    "{operation} timed out after {}ms",
                    self.store_timeout.as_millis()
                )))
            }
        }
    }
}
