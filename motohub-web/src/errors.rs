//! Error types for the web server and its handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use motohub_search::ListingSearchError;
use serde_json::json;
use thiserror::Error;

use crate::pages::render_page;

/// Errors that stop the server or fail a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Listing search or store setup failed.
    #[error("Search error: {0}")]
    Search(#[from] ListingSearchError),

    /// Listener could not be bound or the server stopped unexpectedly.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request failure rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError(pub WebError);

impl From<ListingSearchError> for ApiError {
    fn from(error: ListingSearchError) -> Self {
        Self(WebError::Search(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("API request failed: {}", self.0);

        let body = json!({ "error": "Listing search failed" });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Request failure rendered as an HTML page.
#[derive(Debug)]
pub struct PageError(pub WebError);

impl From<ListingSearchError> for PageError {
    fn from(error: ListingSearchError) -> Self {
        Self(WebError::Search(error))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("Page request failed: {}", self.0);

        let content = r#"<div class="max-w-3xl mx-auto px-4 py-16 text-center">
            <h1 class="text-xl font-black text-black mb-3">検索中にエラーが発生しました</h1>
            <p class="text-gray-400 text-sm mb-6">時間をおいて再度お試しください。</p>
            <a href="/" class="text-sm font-bold text-gray-500 hover:text-black">トップへ戻る</a>
        </div>"#;

        let Html(html) = render_page("エラー", content);
        (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response()
    }
}
