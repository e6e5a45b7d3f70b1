//! Handler for the analytics overview.

use axum::{Json, extract::State};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for every short link, newest first.
///
/// # Endpoint
///
/// `GET /api/shorten/analytics`
pub async fn analytics_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalyticsResponse>>, AppError> {
    let records = state.redirect_service.get_all_analytics().await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
