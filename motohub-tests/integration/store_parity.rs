//! SQLite and in-memory stores must return identical results.

use motohub_core::storage::demo_catalog;
use motohub_core::storage::test_fixtures::{
    ListingBuilder, catalog_with_listings, create_temp_database, minutes_after_epoch,
};
use motohub_core::{
    BikeModel, Catalog, InMemoryListingStore, ListingQuery, ListingRecord, ListingStore,
    MAX_SEARCH_RESULTS, Manufacturer, SqliteListingStore,
};
use proptest::prelude::*;

const TITLES: &[&str] = &[
    "Rebel 250",
    "REBEL250 ABS",
    "ホンダ レブル",
    "CB400SF Revo",
    "ninja 400",
    "100% ノーマル",
    "GSX_R750",
    "GSX-R750",
    "ＲＥＢＥＬ ２５０ カスタム",
    "ÉDITION limitée",
    "Ｎｉｎｊａ ÉVO",
];

const KEYWORDS: &[&str] = &[
    "rebel",
    "Rebel 250",
    "400",
    "%",
    "_",
    "ホンダ",
    "r7",
    "zzz",
    "ｒｅｂｅｌ",
    "édition",
    "évo",
    "kawasaki",
    "ｋａｗａｓａｋｉ",
    "ducati",
];

/// (id, name)
const MAKERS: &[(i32, &str)] = &[(1, "Honda"), (2, "ＫＡＷＡＳＡＫＩ"), (3, "Ducati")];

/// (id, manufacturer id, name)
const MODELS: &[(i32, i32, &str)] = &[
    (1, 1, "Rebel 250"),
    (2, 2, "Ninja 400"),
    (3, 3, "Monster ÉVO"),
];

fn ordered_ids(store: &dyn ListingStore, keyword: &str) -> Vec<i32> {
    store
        .search_listings(&ListingQuery::new(keyword))
        .unwrap()
        .into_iter()
        .map(|record| record.listing.id)
        .collect()
}

fn sqlite_with(catalog: &Catalog) -> (tempfile::TempDir, SqliteListingStore) {
    let (temp_dir, config) = create_temp_database();
    let store = SqliteListingStore::open(&config).unwrap();
    store.import_catalog(catalog).unwrap();
    (temp_dir, store)
}

#[test]
fn test_demo_catalog_parity() {
    let catalog = demo_catalog();
    let (_temp_dir, sqlite) = sqlite_with(&catalog);
    let memory = InMemoryListingStore::new(catalog);

    let keywords = [
        "Rebel 250", "ホンダ", "ninja", "400", "カワサキ", "部品", "none", "REBEL", "ｒｅｂｅｌ",
    ];
    for keyword in keywords {
        assert_eq!(
            ordered_ids(&sqlite, keyword),
            ordered_ids(&memory, keyword),
            "stores disagree on {keyword:?}"
        );
    }
}

#[test]
fn test_demo_lookup_parity() {
    let catalog = demo_catalog();
    let (_temp_dir, sqlite) = sqlite_with(&catalog);
    let memory = InMemoryListingStore::new(catalog);

    for (site, identifier) in [("GooBike", "1000082"), ("BDS", "rebel250"), ("BDS", "1000082")] {
        assert_eq!(
            sqlite.model_by_external_id(site, identifier).unwrap(),
            memory.model_by_external_id(site, identifier).unwrap()
        );
    }
    for (site, identifier) in [("GooBike", "8200345"), ("BDS", "tama-garage"), ("GooBike", "x")] {
        assert_eq!(
            sqlite.shop_by_external_id(site, identifier).unwrap(),
            memory.shop_by_external_id(site, identifier).unwrap()
        );
    }
}

fn listing_strategy() -> impl Strategy<Value = (usize, Option<i32>, bool, Option<u32>)> {
    (
        0..TITLES.len(),
        prop::option::of(1..=MODELS.len() as i32),
        prop::bool::weighted(0.2),
        prop::option::of(0u32..20),
    )
}

fn with_models(mut catalog: Catalog) -> Catalog {
    catalog.manufacturers = MAKERS
        .iter()
        .map(|&(id, name)| Manufacturer {
            id,
            name: name.to_string(),
            name_kana: None,
            country: None,
        })
        .collect();
    catalog.models = MODELS
        .iter()
        .map(|&(id, manufacturer_id, name)| BikeModel {
            id,
            manufacturer_id,
            name: name.to_string(),
            displacement: None,
            category: None,
        })
        .collect();
    catalog
}

/// Joins a listing with its model and maker the way both stores do.
fn record_for(catalog: &Catalog, id: i32) -> ListingRecord {
    let listing = catalog.listings[(id - 1) as usize].clone();
    let model = listing
        .bike_model_id
        .and_then(|model_id| catalog.models.iter().find(|m| m.id == model_id))
        .cloned();
    let manufacturer = model
        .as_ref()
        .and_then(|m| catalog.manufacturers.iter().find(|maker| maker.id == m.manufacturer_id))
        .cloned();

    ListingRecord {
        listing,
        model,
        manufacturer,
        shop: None,
        site: catalog.sites.first().cloned(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_stores_agree_on_random_catalogs(
        rows in prop::collection::vec(listing_strategy(), 0..60),
        keyword_index in 0..KEYWORDS.len(),
    ) {
        let listings = rows
            .iter()
            .zip(1..)
            .map(|(&(title, model_id, sold_out, minutes), id)| {
                let mut builder = ListingBuilder::new(id).title(TITLES[title]);
                if let Some(model_id) = model_id {
                    builder = builder.model(model_id);
                }
                if let Some(minutes) = minutes {
                    builder = builder.created_at(minutes_after_epoch(minutes));
                }
                if sold_out {
                    builder = builder.sold_out();
                }
                builder.build()
            })
            .collect();
        let catalog = with_models(catalog_with_listings(listings));
        let keyword = KEYWORDS[keyword_index];

        let (_temp_dir, sqlite) = sqlite_with(&catalog);
        let memory = InMemoryListingStore::new(catalog.clone());

        let from_sqlite = ordered_ids(&sqlite, keyword);
        prop_assert_eq!(&from_sqlite, &ordered_ids(&memory, keyword));
        prop_assert!(from_sqlite.len() <= MAX_SEARCH_RESULTS);

        let query = ListingQuery::new(keyword);
        for id in &from_sqlite {
            let record = record_for(&catalog, *id);
            prop_assert!(!record.listing.is_sold_out);
            prop_assert!(query.matches(&record), "{keyword:?} does not match listing {id}");
        }

        let expected = catalog
            .listings
            .iter()
            .filter(|listing| !listing.is_sold_out)
            .filter(|listing| query.matches(&record_for(&catalog, listing.id)))
            .count();
        prop_assert_eq!(from_sqlite.len(), expected.min(MAX_SEARCH_RESULTS));
    }
}
