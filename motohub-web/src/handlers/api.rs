//! JSON API handlers for listing search

use axum::extract::{Query, State};
use axum::response::Json;
use motohub_search::ListingCard;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::server::AppState;

/// Query string accepted by the page and the API.
#[derive(Debug, Default, Deserialize)]
pub struct ListingsQuery {
    /// Free-text keyword; missing or blank means the default keyword
    pub keyword: Option<String>,
}

/// Body of `GET /api/listings`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingsResponse {
    /// Keyword actually searched
    pub keyword: String,
    /// Number of listings returned
    pub count: usize,
    /// Matching listings, newest first
    pub listings: Vec<ListingCard>,
}

/// Searches listings and returns the cards as JSON.
///
/// # Errors
///
/// - `ApiError` - If the listing search failed
pub async fn api_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingsQuery>,
) -> Result<Json<ListingsResponse>, ApiError> {
    let results = state.search_service.search(params.keyword.as_deref()).await?;

    Ok(Json(ListingsResponse {
        count: results.len(),
        keyword: results.keyword,
        listings: results.listings,
    }))
}

/// Liveness check.
pub async fn health() -> &'static str {
    "ok"
}
