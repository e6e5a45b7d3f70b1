//! API route configuration.

use crate::api::handlers::{analytics_handler, analytics_list_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                  - Create a short link
/// - `GET  /shorten/analytics`        - Statistics for every link
/// - `GET  /shorten/analytics/{code}` - Statistics for one link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/analytics", get(analytics_list_handler))
        .route("/shorten/analytics/{code}", get(analytics_handler))
}
