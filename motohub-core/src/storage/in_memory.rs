//! Listing store backed by a catalog held in memory.
//!
//! Applies the same filter, ordering and cap as the SQLite store so that
//! development mode and tests behave like production.

use std::collections::HashMap;

use super::{ListingStore, StorageResult, demo_catalog};
use crate::catalog::{
    BikeModel, Catalog, ExternalId, ListingQuery, ListingRecord, Manufacturer, Shop, Site,
};

/// Read-only store answering queries from a `Catalog`.
#[derive(Debug, Clone)]
pub struct InMemoryListingStore {
    catalog: Catalog,
    models: HashMap<i32, BikeModel>,
    manufacturers: HashMap<i32, Manufacturer>,
    shops: HashMap<i32, Shop>,
    sites: HashMap<i32, Site>,
}

impl InMemoryListingStore {
    /// Indexes the catalog by primary key.
    pub fn new(catalog: Catalog) -> Self {
        let models = catalog.models.iter().map(|m| (m.id, m.clone())).collect();
        let manufacturers = catalog
            .manufacturers
            .iter()
            .map(|m| (m.id, m.clone()))
            .collect();
        let shops = catalog.shops.iter().map(|s| (s.id, s.clone())).collect();
        let sites = catalog.sites.iter().map(|s| (s.id, s.clone())).collect();

        Self {
            catalog,
            models,
            manufacturers,
            shops,
            sites,
        }
    }

    /// Store preloaded with the built-in demo catalog.
    pub fn with_demo_data() -> Self {
        Self::new(demo_catalog())
    }

    fn site_id(&self, site: &str) -> Option<i32> {
        self.catalog
            .sites
            .iter()
            .find(|s| s.name == site)
            .map(|s| s.id)
    }

    fn resolve_identifier(
        &self,
        identifiers: &[ExternalId],
        site: &str,
        identifier: &str,
    ) -> Option<i32> {
        let site_id = self.site_id(site)?;
        identifiers
            .iter()
            .find(|ext| ext.site_id == site_id && ext.identifier == identifier)
            .map(|ext| ext.owner_id)
    }
}

impl Default for InMemoryListingStore {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl ListingStore for InMemoryListingStore {
    fn search_listings(&self, query: &ListingQuery) -> StorageResult<Vec<ListingRecord>> {
        let mut records: Vec<ListingRecord> = self
            .catalog
            .listings
            .iter()
            .filter(|listing| !listing.is_sold_out)
            .map(|listing| {
                let model = listing
                    .bike_model_id
                    .and_then(|id| self.models.get(&id))
                    .cloned();
                let manufacturer = model
                    .as_ref()
                    .and_then(|m| self.manufacturers.get(&m.manufacturer_id))
                    .cloned();

                ListingRecord {
                    listing: listing.clone(),
                    model,
                    manufacturer,
                    shop: listing.shop_id.and_then(|id| self.shops.get(&id)).cloned(),
                    site: self.sites.get(&listing.site_id).cloned(),
                }
            })
            .filter(|record| query.matches(record))
            .collect();

        records.sort_by(ListingRecord::newest_first);
        records.truncate(query.limit());

        tracing::debug!(
            keyword = query.keyword(),
            matched = records.len(),
            "In-memory listing search"
        );
        Ok(records)
    }

    fn model_by_external_id(
        &self,
        site: &str,
        identifier: &str,
    ) -> StorageResult<Option<BikeModel>> {
        Ok(self
            .resolve_identifier(&self.catalog.model_identifiers, site, identifier)
            .and_then(|id| self.models.get(&id))
            .cloned())
    }

    fn shop_by_external_id(&self, site: &str, identifier: &str) -> StorageResult<Option<Shop>> {
        Ok(self
            .resolve_identifier(&self.catalog.shop_identifiers, site, identifier)
            .and_then(|id| self.shops.get(&id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MAX_SEARCH_RESULTS;
    use crate::storage::test_fixtures::{ListingBuilder, catalog_with_listings};

    #[test]
    fn test_demo_search_excludes_sold_out() {
        let store = InMemoryListingStore::with_demo_data();
        let records = store
            .search_listings(&ListingQuery::new("Rebel 250"))
            .unwrap();

        let ids: Vec<i32> = records.iter().map(|r| r.listing.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(records.iter().all(|r| !r.listing.is_sold_out));
    }

    #[test]
    fn test_search_matches_manufacturer_name() {
        let store = InMemoryListingStore::with_demo_data();
        let records = store.search_listings(&ListingQuery::new("ホンダ")).unwrap();

        // Every Honda model plus the unassigned listing titled with the maker
        let ids: Vec<i32> = records.iter().map(|r| r.listing.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 9]);
    }

    #[test]
    fn test_search_caps_results() {
        let listings = (1..=40)
            .map(|id| ListingBuilder::new(id).title("Rebel 250").build())
            .collect();
        let store = InMemoryListingStore::new(catalog_with_listings(listings));

        let records = store
            .search_listings(&ListingQuery::new("rebel"))
            .unwrap();
        assert_eq!(records.len(), MAX_SEARCH_RESULTS);
        assert_eq!(records[0].listing.id, 40);
    }

    #[test]
    fn test_listing_without_model_has_no_manufacturer() {
        let store = InMemoryListingStore::with_demo_data();
        let records = store.search_listings(&ListingQuery::new("部品取り")).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].model.is_none());
        assert!(records[0].manufacturer.is_none());
        assert!(records[0].shop.is_none());
        assert_eq!(records[0].site.as_ref().map(|s| s.name.as_str()), Some("GooBike"));
    }

    #[test]
    fn test_external_id_lookups() {
        let store = InMemoryListingStore::with_demo_data();

        let model = store.model_by_external_id("GooBike", "1000082").unwrap();
        assert_eq!(model.map(|m| m.name), Some("Rebel 250".to_string()));

        let shop = store.shop_by_external_id("BDS", "tama-garage").unwrap();
        assert_eq!(shop.map(|s| s.id), Some(2));

        // Identifiers are scoped to their site
        assert!(store.model_by_external_id("BDS", "1000082").unwrap().is_none());
        assert!(store.shop_by_external_id("Unknown", "8200345").unwrap().is_none());
    }
}
