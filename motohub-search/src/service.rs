//! Listing search service
//!
//! Resolves the keyword, queries the listing store on a blocking thread and
//! formats the matches for display.

use std::sync::Arc;
use std::time::Instant;

use motohub_core::config::DEFAULT_KEYWORD;
use motohub_core::{
    BikeModel, InMemoryListingStore, ListingQuery, ListingStore, MotohubConfig, RuntimeMode,
    Shop, SqliteListingStore, StorageResult,
};
use serde::Serialize;

use crate::errors::ListingSearchError;
use crate::formatter::ListingCard;
use crate::keyword::resolve_keyword;

/// Outcome of a keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// Keyword actually searched, after trimming and defaulting
    pub keyword: String,
    /// Matching listings, newest first
    pub listings: Vec<ListingCard>,
}

impl SearchResults {
    /// Number of listings found.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the search found nothing.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Listing search service shared across requests.
///
/// Cloning is cheap; clones share the same store.
#[derive(Debug, Clone)]
pub struct ListingSearchService {
    store: Arc<dyn ListingStore>,
    default_keyword: String,
}

impl ListingSearchService {
    /// Creates a service over `store`, searching `default_keyword` when a
    /// request carries no keyword.
    pub fn new(store: Arc<dyn ListingStore>, default_keyword: impl Into<String>) -> Self {
        Self {
            store,
            default_keyword: default_keyword.into(),
        }
    }

    /// Creates a service over the built-in demo catalog.
    ///
    /// Lets the UI run without a database.
    pub fn new_demo() -> Self {
        Self::new(
            Arc::new(InMemoryListingStore::with_demo_data()),
            DEFAULT_KEYWORD,
        )
    }

    /// Creates the service appropriate for the runtime mode.
    ///
    /// Production opens the SQLite database from `config`; development uses
    /// the demo catalog.
    ///
    /// # Errors
    ///
    /// - `ListingSearchError::Storage` - If the database cannot be opened or migrated
    pub fn from_runtime_mode(
        mode: RuntimeMode,
        config: &MotohubConfig,
    ) -> Result<Self, ListingSearchError> {
        let store: Arc<dyn ListingStore> = match mode {
            RuntimeMode::Production => Arc::new(SqliteListingStore::open(&config.database)?),
            RuntimeMode::Development => Arc::new(InMemoryListingStore::with_demo_data()),
        };

        tracing::info!("Listing search running in {mode} mode");
        Ok(Self::new(store, config.search.default_keyword.clone()))
    }

    /// Keyword searched when a request has none.
    pub fn default_keyword(&self) -> &str {
        &self.default_keyword
    }

    /// Searches active listings for the keyword.
    ///
    /// A missing or blank keyword searches the default keyword instead.
    ///
    /// # Errors
    ///
    /// - `ListingSearchError::Storage` - If the store query failed
    /// - `ListingSearchError::TaskFailed` - If the blocking query task did not complete
    pub async fn search(&self, keyword: Option<&str>) -> Result<SearchResults, ListingSearchError> {
        let keyword = resolve_keyword(keyword, &self.default_keyword);
        let query = ListingQuery::new(keyword.clone());
        let started = Instant::now();

        let records = self
            .run_blocking(move |store| store.search_listings(&query))
            .await?;

        tracing::info!(
            keyword = %keyword,
            matched = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Listing search completed"
        );

        Ok(SearchResults {
            keyword,
            listings: records.iter().map(ListingCard::from).collect(),
        })
    }

    /// Resolves a site's native model identifier.
    ///
    /// # Errors
    ///
    /// - `ListingSearchError::Storage` - If the store query failed
    /// - `ListingSearchError::TaskFailed` - If the blocking query task did not complete
    pub async fn model_by_external_id(
        &self,
        site: &str,
        identifier: &str,
    ) -> Result<Option<BikeModel>, ListingSearchError> {
        let (site, identifier) = (site.to_string(), identifier.to_string());
        self.run_blocking(move |store| store.model_by_external_id(&site, &identifier))
            .await
    }

    /// Resolves a site's native shop identifier.
    ///
    /// # Errors
    ///
    /// - `ListingSearchError::Storage` - If the store query failed
    /// - `ListingSearchError::TaskFailed` - If the blocking query task did not complete
    pub async fn shop_by_external_id(
        &self,
        site: &str,
        identifier: &str,
    ) -> Result<Option<Shop>, ListingSearchError> {
        let (site, identifier) = (site.to_string(), identifier.to_string());
        self.run_blocking(move |store| store.shop_by_external_id(&site, &identifier))
            .await
    }

    /// Runs a store operation on tokio's blocking pool.
    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, ListingSearchError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ListingStore) -> StorageResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);

        let result = tokio::task::spawn_blocking(move || operation(store.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!("Listing store task failed: {e}");
                ListingSearchError::TaskFailed {
                    reason: e.to_string(),
                }
            })?;

        Ok(result?)
    }
}

impl Default for ListingSearchService {
    fn default() -> Self {
        Self::new_demo()
    }
}

#[cfg(test)]
mod tests {
    use motohub_core::storage::test_fixtures::{
        ListingBuilder, catalog_with_listings, minutes_after_epoch,
    };
    use motohub_core::{ListingRecord, MAX_SEARCH_RESULTS, StorageError};

    use super::*;

    #[derive(Debug)]
    struct FailingStore;

    impl ListingStore for FailingStore {
        fn search_listings(&self, _query: &ListingQuery) -> StorageResult<Vec<ListingRecord>> {
            Err(StorageError::Migration {
                reason: "schema missing".to_string(),
            })
        }

        fn model_by_external_id(&self, _: &str, _: &str) -> StorageResult<Option<BikeModel>> {
            Ok(None)
        }

        fn shop_by_external_id(&self, _: &str, _: &str) -> StorageResult<Option<Shop>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_blank_keyword_uses_default() {
        let service = ListingSearchService::new_demo();

        let results = service.search(Some("   ")).await.unwrap();
        assert_eq!(results.keyword, "Rebel 250");
        assert_eq!(results.len(), 3);

        let missing = service.search(None).await.unwrap();
        assert_eq!(missing, results);
    }

    #[tokio::test]
    async fn test_search_formats_cards() {
        let service = ListingSearchService::new_demo();
        let results = service.search(Some("Rebel 250")).await.unwrap();

        let first = &results.listings[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.source_id, "goobike");
        assert_eq!(first.total_price, "59.8");

        // Listing 2 comes from BDS with a 1,234,500 yen total
        let second = &results.listings[1];
        assert_eq!(second.source, "BDS");
        assert_eq!(second.total_price, "123.5");

        // Listing 3 has no shop and a zero mileage
        let third = &results.listings[2];
        assert_eq!(third.store_name, "個人出品等");
        assert_eq!(third.mileage, "走行不明");
        assert_eq!(third.year, "年式不明");
    }

    #[tokio::test]
    async fn test_custom_default_keyword() {
        let store = InMemoryListingStore::with_demo_data();
        let service = ListingSearchService::new(Arc::new(store), "Ninja");

        let results = service.search(Some("")).await.unwrap();
        assert_eq!(results.keyword, "Ninja");
        assert_eq!(results.len(), 1);
        assert_eq!(service.default_keyword(), "Ninja");
    }

    #[tokio::test]
    async fn test_no_match_is_empty() {
        let service = ListingSearchService::new_demo();
        let results = service.search(Some("Vmax 1700")).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(results.keyword, "Vmax 1700");
    }

    #[tokio::test]
    async fn test_results_are_capped() {
        let listings = (1..=50)
            .map(|id| {
                ListingBuilder::new(id)
                    .title("Rebel 250")
                    .created_at(minutes_after_epoch(id as u32))
                    .build()
            })
            .collect();
        let store = InMemoryListingStore::new(catalog_with_listings(listings));
        let service = ListingSearchService::new(Arc::new(store), DEFAULT_KEYWORD);

        let results = service.search(None).await.unwrap();
        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results.listings[0].id, 50);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let service = ListingSearchService::new(Arc::new(FailingStore), DEFAULT_KEYWORD);

        let error = service.search(Some("Rebel")).await.unwrap_err();
        assert!(matches!(error, ListingSearchError::Storage(_)));
    }

    #[tokio::test]
    async fn test_external_id_lookups() {
        let service = ListingSearchService::new_demo();

        let model = service.model_by_external_id("GooBike", "1003571").await.unwrap();
        assert_eq!(model.map(|m| m.name), Some("YZF-R25".to_string()));

        let shop = service.shop_by_external_id("GooBike", "missing").await.unwrap();
        assert!(shop.is_none());
    }

    #[test]
    fn test_development_mode_needs_no_database() {
        let mut config = MotohubConfig::default();
        config.database.url = "/nonexistent/dir/motohub.db".to_string();

        let service =
            ListingSearchService::from_runtime_mode(RuntimeMode::Development, &config).unwrap();
        let results = tokio_test::block_on(service.search(None)).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_production_mode_reads_database() {
        let config = MotohubConfig::for_testing(":memory:");

        let service =
            ListingSearchService::from_runtime_mode(RuntimeMode::Production, &config).unwrap();
        let results = tokio_test::block_on(service.search(Some("Rebel"))).unwrap();

        // Freshly migrated database has no listings yet
        assert!(results.is_empty());
        assert_eq!(results.keyword, "Rebel");
    }
}
