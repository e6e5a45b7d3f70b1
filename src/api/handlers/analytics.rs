//! Handler for single-link analytics.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns usage statistics for one short link.
///
/// # Endpoint
///
/// `GET /api/shorten/analytics/{code}`
///
/// Reading analytics never counts as a click.
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://a.test",
///   "shortUrl": "Xk7pQ2m",
///   "clicks": 2,
///   "creationDate": "2026-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let record = state
        .redirect_service
        .get_analytics(&code)
        .await?
        .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

    Ok(Json(record.into()))
}
