//! Error taxonomy for code generation and link storage.

use thiserror::Error;

/// Failures raised by the code generator, the link stores and the redirect
/// service.
///
/// "Not found" is deliberately absent: lookups return `Ok(None)` for
/// unknown codes.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The OS entropy source could not be read.
    #[error("random code generator unavailable: {0}")]
    GeneratorUnavailable(String),

    /// The short code is already taken. Recovered by retrying with a fresh code.
    #[error("short code `{0}` already exists")]
    DuplicateCode(String),

    /// Every attempt to find a free short code collided.
    #[error("no free short code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// The backing store failed or timed out.
    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),

    /// The URL to shorten was empty or contained control characters.
    #[error("original URL must not be empty or contain control characters")]
    InvalidUrl,
}

impl LinkError {
    /// Wraps any backend error as [`LinkError::StoreUnavailable`].
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
