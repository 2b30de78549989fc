//! Catalog domain types.
//!
//! Plain data describing manufacturers, bike models, shops, source sites and
//! scraped listings, independent of how they are stored.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hard cap on the number of listings a keyword search returns.
pub const MAX_SEARCH_RESULTS: usize = 30;

/// Motorcycle manufacturer master entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: i32,
    pub name: String,
    pub name_kana: Option<String>,
    pub country: Option<String>,
}

/// Canonical catalog entry for a motorcycle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeModel {
    pub id: i32,
    pub manufacturer_id: i32,
    pub name: String,
    /// Engine displacement in cc
    pub displacement: Option<i32>,
    pub category: Option<String>,
}

/// Dealer that publishes listings on one or more sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i32,
    pub name: String,
    pub prefecture: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// External marketplace listings are scraped from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i32,
    pub name: String,
    pub base_url: Option<String>,
}

/// A single scraped advertisement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i32,
    pub bike_model_id: Option<i32>,
    pub shop_id: Option<i32>,
    pub site_id: i32,
    pub title: Option<String>,
    pub source_url: String,
    /// Vehicle price in yen
    pub price: Option<i64>,
    /// Total payment in yen
    pub total_price: Option<i64>,
    pub model_year: Option<i32>,
    /// Odometer reading in km
    pub mileage: Option<i32>,
    pub image_urls: Vec<String>,
    pub local_image_paths: Vec<String>,
    pub is_sold_out: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Site-native identifier mapped onto a canonical model or shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalId {
    pub id: i32,
    /// Model id or shop id, depending on the table
    pub owner_id: i32,
    pub site_id: i32,
    pub identifier: String,
}

/// Listing joined with everything needed to display it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub listing: Listing,
    pub model: Option<BikeModel>,
    pub manufacturer: Option<Manufacturer>,
    pub shop: Option<Shop>,
    pub site: Option<Site>,
}

impl ListingRecord {
    /// Ordering used by every search: newest `created_at` first, then highest id.
    ///
    /// Undated listings sort after dated ones.
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        b.listing
            .created_at
            .cmp(&a.listing.created_at)
            .then_with(|| b.listing.id.cmp(&a.listing.id))
    }
}

/// Complete set of catalog rows, used to build stores and fixtures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub manufacturers: Vec<Manufacturer>,
    pub models: Vec<BikeModel>,
    pub shops: Vec<Shop>,
    pub sites: Vec<Site>,
    pub listings: Vec<Listing>,
    pub model_identifiers: Vec<ExternalId>,
    pub shop_identifiers: Vec<ExternalId>,
}

/// Keyword search request understood by every listing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    keyword: String,
    /// Unicode-lowercased keyword, compared against lowercased text
    folded: String,
    limit: usize,
}

impl ListingQuery {
    /// Creates a query for the keyword with the standard result cap.
    pub fn new(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        Self {
            folded: keyword.to_lowercase(),
            keyword,
            limit: MAX_SEARCH_RESULTS,
        }
    }

    /// Lowers the result cap. Values above the standard cap are clamped.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_SEARCH_RESULTS);
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// SQL `LIKE` pattern matching the lowercased keyword as a literal substring.
    ///
    /// Compare it against Unicode-lowercased columns. `%`, `_` and `\` are
    /// escaped with `\`, which must be passed as the `ESCAPE` character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.folded.len() + 2);
        pattern.push('%');
        for ch in self.folded.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Checks whether a text contains the keyword, ignoring case in any script.
    ///
    /// Both sides go through `str::to_lowercase`, the same folding the SQLite
    /// store applies with `motohub_lower`.
    pub fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }

    /// Checks the title, model name and manufacturer name of a record.
    pub fn matches(&self, record: &ListingRecord) -> bool {
        let title = record.listing.title.as_deref();
        let model = record.model.as_ref().map(|m| m.name.as_str());
        let maker = record.manufacturer.as_ref().map(|m| m.name.as_str());

        [title, model, maker]
            .into_iter()
            .flatten()
            .any(|text| self.matches_text(text))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(id: i32, created_at: Option<NaiveDateTime>) -> ListingRecord {
        ListingRecord {
            listing: Listing {
                id,
                bike_model_id: None,
                shop_id: None,
                site_id: 1,
                title: Some(format!("listing {id}")),
                source_url: format!("https://example.com/{id}"),
                price: None,
                total_price: None,
                model_year: None,
                mileage: None,
                image_urls: Vec::new(),
                local_image_paths: Vec::new(),
                is_sold_out: false,
                created_at,
                updated_at: None,
            },
            model: None,
            manufacturer: None,
            shop: None,
            site: None,
        }
    }

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2026, 1, day).and_then(|d| d.and_hms_opt(12, 0, 0))
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(ListingQuery::new("Rebel 250").like_pattern(), "%rebel 250%");
        assert_eq!(ListingQuery::new("ＣＢ４００").like_pattern(), "%ｃｂ４００%");
        assert_eq!(ListingQuery::new("100%").like_pattern(), "%100\\%%");
        assert_eq!(ListingQuery::new("a_b\\c").like_pattern(), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(ListingQuery::new("x").limit(), MAX_SEARCH_RESULTS);
        assert_eq!(ListingQuery::new("x").with_limit(5).limit(), 5);
        assert_eq!(
            ListingQuery::new("x").with_limit(500).limit(),
            MAX_SEARCH_RESULTS
        );
    }

    #[test]
    fn test_matches_folds_case() {
        let query = ListingQuery::new("rebel");
        assert!(query.matches_text("Honda REBEL 250"));
        assert!(!query.matches_text("CB400SF"));

        let kana = ListingQuery::new("ホンダ");
        assert!(kana.matches_text("ホンダ レブル"));
    }

    #[test]
    fn test_matches_folds_full_width_and_accented_case() {
        assert!(ListingQuery::new("ｒｅｂｅｌ").matches_text("ＲＥＢＥＬ ２５０ カスタム"));
        assert!(ListingQuery::new("ＲＥＢＥＬ").matches_text("ｒｅｂｅｌ ２５０"));
        assert!(ListingQuery::new("édition").matches_text("Monster ÉDITION"));
        assert!(ListingQuery::new("ÉDITION").matches_text("sport édition"));

        // Width is not folded, only case
        assert!(!ListingQuery::new("rebel").matches_text("ＲＥＢＥＬ ２５０"));
    }

    #[test]
    fn test_matches_any_field() {
        let mut by_maker = record(1, None);
        by_maker.listing.title = None;
        by_maker.manufacturer = Some(Manufacturer {
            id: 1,
            name: "Honda".to_string(),
            name_kana: None,
            country: None,
        });

        assert!(ListingQuery::new("honda").matches(&by_maker));
        assert!(!ListingQuery::new("yamaha").matches(&by_maker));
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut records = vec![
            record(1, at(1)),
            record(2, None),
            record(3, at(3)),
            record(4, at(3)),
        ];
        records.sort_by(ListingRecord::newest_first);

        let ids: Vec<i32> = records.iter().map(|r| r.listing.id).collect();
        assert_eq!(ids, vec![4, 3, 1, 2]);
    }

    proptest::proptest! {
        #[test]
        fn prop_keyword_found_in_any_casing(
            prefix in "[a-z0-9 ]{0,8}",
            keyword in "[a-zA-Z0-9%_ａ-ｚＡ-Ｚà-öÀ-Ö]{1,12}",
            suffix in "[a-z0-9 ]{0,8}",
        ) {
            let query = ListingQuery::new(keyword.clone());
            let text = format!("{prefix}{}{suffix}", keyword.to_uppercase());

            proptest::prop_assert!(query.matches_text(&text));
            proptest::prop_assert!(query.like_pattern().len() >= keyword.len() + 2);
        }
    }
}
