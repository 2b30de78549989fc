//! Full request path: HTTP router, search service and SQLite store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use motohub_core::config::DEFAULT_KEYWORD;
use motohub_core::storage::demo_catalog;
use motohub_core::storage::test_fixtures::create_temp_database;
use motohub_core::SqliteListingStore;
use motohub_search::ListingSearchService;
use motohub_web::{AppState, build_router};
use tower::ServiceExt;

fn sqlite_router() -> (tempfile::TempDir, Router) {
    let (temp_dir, config) = create_temp_database();
    let store = SqliteListingStore::open(&config).unwrap();
    store.import_catalog(&demo_catalog()).unwrap();

    let service = ListingSearchService::new(Arc::new(store), DEFAULT_KEYWORD);
    (temp_dir, build_router(AppState::new(service)))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_search_page_from_database() {
    let (_temp_dir, router) = sqlite_router();

    let (status, content_type, html) = get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(html.contains(r#"<html lang="ja">"#));
    assert!(html.contains(r#"value="Rebel 250""#));
    assert!(html.contains("3 Items"));
    assert!(html.contains("バイクショップ湘南"));
    assert!(html.contains("個人出品等"));
}

#[tokio::test]
async fn test_page_and_api_agree() {
    let (_temp_dir, router) = sqlite_router();
    let keyword = urlencoding::encode("ホンダ");

    let (_, _, html) = get(router.clone(), &format!("/?keyword={keyword}")).await;
    let (status, content_type, body) =
        get(router, &format!("/api/listings?keyword={keyword}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let listings = json["listings"].as_array().unwrap();
    assert_eq!(json["keyword"], "ホンダ");
    assert_eq!(json["count"], listings.len());
    assert!(html.contains(&format!("{} Items", listings.len())));

    let ids: Vec<i64> = listings
        .iter()
        .map(|card| card["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 5, 9]);

    for id in ids {
        assert!(html.contains(&format!(r#"data-listing-id="{id}""#)));
    }
}

#[tokio::test]
async fn test_api_card_fields() {
    let (_temp_dir, router) = sqlite_router();

    let (_, _, body) = get(router, "/api/listings?keyword=Rebel%20250").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let bds = &json["listings"][1];

    assert_eq!(bds["id"], 2);
    assert_eq!(bds["source_id"], "bds");
    assert_eq!(bds["source"], "BDS");
    assert_eq!(bds["total_price"], "123.5");
    assert_eq!(bds["mileage"], "15,400km");
    assert_eq!(bds["maker"], "ホンダ");
}

#[tokio::test]
async fn test_unmatched_keyword_renders_empty_grid() {
    let (_temp_dir, router) = sqlite_router();

    let (status, _, html) = get(router, "/?keyword=Hayabusa").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"value="Hayabusa""#));
    assert!(html.contains("0 Items"));
    assert!(!html.contains("data-listing-id"));
}

