//! Test fixtures for storage testing.
//!
//! Provides temporary databases and listing builders so store tests in this
//! crate and downstream crates share the same setup.

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{Catalog, Listing, Site};
use crate::config::DatabaseConfig;

/// Creates a database config pointing at a fresh file in a temp directory.
///
/// The returned `TempDir` must outlive every connection to the database.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
/// This is acceptable in test fixtures where failures indicate environment issues.
pub fn create_temp_database() -> (tempfile::TempDir, DatabaseConfig) {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: temp_dir.path().join("motohub-test.db").display().to_string(),
        max_connections: 2,
    };
    (temp_dir, config)
}

/// Timestamp on a fixed test day, offset by minutes.
pub fn minutes_after_epoch(minutes: u32) -> NaiveDateTime {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    base + chrono::Duration::minutes(i64::from(minutes))
}

/// Catalog with one site and the given listings, no models or shops.
pub fn catalog_with_listings(listings: Vec<Listing>) -> Catalog {
    Catalog {
        sites: vec![Site {
            id: 1,
            name: "GooBike".to_string(),
            base_url: Some("https://www.goobike.com".to_string()),
        }],
        listings,
        ..Catalog::default()
    }
}

/// Builder for listings with sensible defaults.
#[derive(Debug, Clone)]
pub struct ListingBuilder {
    listing: Listing,
}

impl ListingBuilder {
    pub fn new(id: i32) -> Self {
        Self {
            listing: Listing {
                id,
                bike_model_id: None,
                shop_id: None,
                site_id: 1,
                title: None,
                source_url: format!("https://example.com/listings/{id}"),
                price: None,
                total_price: None,
                model_year: None,
                mileage: None,
                image_urls: Vec::new(),
                local_image_paths: Vec::new(),
                is_sold_out: false,
                created_at: None,
                updated_at: None,
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.listing.title = Some(title.to_string());
        self
    }

    pub fn model(mut self, model_id: i32) -> Self {
        self.listing.bike_model_id = Some(model_id);
        self
    }

    pub fn shop(mut self, shop_id: i32) -> Self {
        self.listing.shop_id = Some(shop_id);
        self
    }

    pub fn site(mut self, site_id: i32) -> Self {
        self.listing.site_id = site_id;
        self
    }

    pub fn total_price(mut self, yen: i64) -> Self {
        self.listing.total_price = Some(yen);
        self
    }

    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.listing.created_at = Some(created_at);
        self
    }

    pub fn sold_out(mut self) -> Self {
        self.listing.is_sold_out = true;
        self
    }

    pub fn build(self) -> Listing {
        self.listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_database_path() {
        let (temp_dir, config) = create_temp_database();

        assert!(config.url.starts_with(&temp_dir.path().display().to_string()));
        assert!(temp_dir.path().is_dir());
    }

    #[test]
    fn test_listing_builder() {
        let listing = ListingBuilder::new(7)
            .title("Rebel 250")
            .created_at(minutes_after_epoch(5))
            .sold_out()
            .build();

        assert_eq!(listing.id, 7);
        assert!(listing.is_sold_out);
        assert!(listing.created_at > Some(minutes_after_epoch(4)));
    }
}
