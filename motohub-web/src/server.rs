//! Web server for the MotoHub listing search
//!
//! Serves the server-rendered search page and the JSON API from one router.

use axum::Router;
use axum::routing::get;
use motohub_core::{MotohubConfig, RuntimeMode};
use motohub_search::ListingSearchService;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::WebError;
use crate::handlers::{api_listings, health};
use crate::pages::listings_page;

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Listing search shared across requests
    pub search_service: ListingSearchService,
}

impl AppState {
    /// Creates handler state around a search service.
    pub fn new(search_service: ListingSearchService) -> Self {
        Self { search_service }
    }
}

/// Builds the application router with tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Search page
        .route("/", get(listings_page))
        // JSON API endpoints
        .route("/api/listings", get(api_listings))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Runs the server until it is stopped.
///
/// # Errors
///
/// - `WebError::Search` - If the listing store cannot be opened
/// - `WebError::Io` - If the listen address cannot be bound
pub async fn run_server(config: MotohubConfig, mode: RuntimeMode) -> Result<(), WebError> {
    let search_service = ListingSearchService::from_runtime_mode(mode, &config)?;
    let app = build_router(AppState::new(search_service));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("MotoHub listing search running on http://{address} ({mode} mode)");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use motohub_core::config::DEFAULT_KEYWORD;
    use motohub_core::{
        BikeModel, ListingQuery, ListingRecord, ListingStore, Shop, StorageError, StorageResult,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::ListingsResponse;

    #[derive(Debug)]
    struct BrokenStore;

    impl ListingStore for BrokenStore {
        fn search_listings(&self, _query: &ListingQuery) -> StorageResult<Vec<ListingRecord>> {
            Err(StorageError::Migration {
                reason: "no schema".to_string(),
            })
        }

        fn model_by_external_id(&self, _: &str, _: &str) -> StorageResult<Option<BikeModel>> {
            Ok(None)
        }

        fn shop_by_external_id(&self, _: &str, _: &str) -> StorageResult<Option<Shop>> {
            Ok(None)
        }
    }

    fn demo_router() -> Router {
        build_router(AppState::new(ListingSearchService::new_demo()))
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_page_defaults_keyword() {
        let (status, html) = get_body(demo_router(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"value="Rebel 250""#));
        assert!(html.contains("3 Items"));
        assert!(html.contains("ホンダ Rebel 250 ABS 低走行"));
        assert!(!html.contains("売約済み"));
    }

    #[tokio::test]
    async fn test_page_escapes_keyword() {
        let uri = format!("/?keyword={}", urlencoding::encode("<b>Ninja</b>"));
        let (status, html) = get_body(demo_router(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("&lt;b&gt;Ninja&lt;/b&gt;"));
        assert!(!html.contains("<b>Ninja</b>"));
        assert!(html.contains("0 Items"));
    }

    #[tokio::test]
    async fn test_api_listings_json() {
        let uri = format!("/api/listings?keyword={}", urlencoding::encode("ホンダ"));
        let (status, body) = get_body(demo_router(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        let response: ListingsResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.keyword, "ホンダ");
        assert_eq!(response.count, response.listings.len());
        assert_eq!(response.count, 5);
        assert_eq!(response.listings[1].total_price, "123.5");
    }

    #[tokio::test]
    async fn test_api_blank_keyword_uses_default() {
        let (_, body) = get_body(demo_router(), "/api/listings?keyword=%20%20").await;

        let response: ListingsResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.keyword, DEFAULT_KEYWORD);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_body(demo_router(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() {
        let service = ListingSearchService::new(Arc::new(BrokenStore), DEFAULT_KEYWORD);
        let router = build_router(AppState::new(service));

        let (status, body) = get_body(router.clone(), "/api/listings").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Listing search failed"));
        assert!(!body.contains("no schema"));

        let (status, html) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("検索中にエラーが発生しました"));
    }
}
