//! Listing search page - the MotoHub landing page

use axum::extract::{Query, State};
use axum::response::Html;

use crate::components::{listing_card, results_grid, results_header, search_hero};
use crate::errors::PageError;
use crate::handlers::ListingsQuery;
use crate::pages::render_page;
use crate::server::AppState;

/// Renders the search form and the matching listings.
///
/// # Errors
///
/// - `PageError` - If the listing search failed
pub async fn listings_page(
    State(state): State<AppState>,
    Query(params): Query<ListingsQuery>,
) -> Result<Html<String>, PageError> {
    let results = state.search_service.search(params.keyword.as_deref()).await?;

    let cards: String = results.listings.iter().map(listing_card).collect();
    let content = format!(
        r#"{}
        <div class="max-w-7xl mx-auto px-4 py-6">
            {}
            {}
        </div>"#,
        search_hero(&results.keyword),
        results_header(results.len()),
        results_grid(&cards)
    );

    Ok(render_page("バイクをまとめて検索", &content))
}
