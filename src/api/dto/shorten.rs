//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten. Stored verbatim; empty values and control
    /// characters are rejected.
    #[validate(length(min = 1, message = "originalUrl must not be empty"))]
    pub original_url: String,
}

/// Result of a successful shorten request.
///
/// `short_url` carries the short code; clients prefix it with the service's
/// public base address.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
