//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "originalUrl": "https://example.com/some/long/path", "shortUrl": "Xk7pQ2m" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or `originalUrl` is empty.
/// Returns 500 Internal Server Error if the store fails or no free code is found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .redirect_service
        .shorten(&payload.original_url)
        .await?;

    Ok(Json(ShortenResponse {
        original_url: record.original_url,
        short_url: record.short_code,
    }))
}
