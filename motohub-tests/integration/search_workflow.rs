//! Search service over a real SQLite catalog.

use std::sync::Arc;

use motohub_core::config::DEFAULT_KEYWORD;
use motohub_core::storage::test_fixtures::{
    ListingBuilder, create_temp_database, minutes_after_epoch,
};
use motohub_core::{
    BikeModel, Catalog, ListingStore, MAX_SEARCH_RESULTS, Manufacturer, Site, SqliteListingStore,
};
use motohub_search::ListingSearchService;

fn sites() -> Vec<Site> {
    vec![
        Site {
            id: 1,
            name: "GooBike".to_string(),
            base_url: None,
        },
        Site {
            id: 2,
            name: "BDS".to_string(),
            base_url: None,
        },
    ]
}

fn honda_catalog() -> Catalog {
    Catalog {
        sites: sites(),
        manufacturers: vec![Manufacturer {
            id: 1,
            name: "Honda".to_string(),
            name_kana: Some("ホンダ".to_string()),
            country: Some("日本".to_string()),
        }],
        models: vec![
            BikeModel {
                id: 1,
                manufacturer_id: 1,
                name: "Rebel 250".to_string(),
                displacement: Some(250),
                category: None,
            },
            BikeModel {
                id: 2,
                manufacturer_id: 1,
                name: "CB400SF".to_string(),
                displacement: Some(400),
                category: None,
            },
        ],
        listings: vec![
            // Matches through the title only
            ListingBuilder::new(1)
                .title("rebel 250 custom")
                .created_at(minutes_after_epoch(10))
                .build(),
            // Matches through the model name only
            ListingBuilder::new(2)
                .title("レブル 低走行")
                .model(1)
                .site(2)
                .created_at(minutes_after_epoch(20))
                .build(),
            // Matches nothing but the manufacturer
            ListingBuilder::new(3)
                .title("CB400 Revo")
                .model(2)
                .created_at(minutes_after_epoch(30))
                .build(),
            ListingBuilder::new(4)
                .title("Rebel 250 sold")
                .model(1)
                .created_at(minutes_after_epoch(40))
                .sold_out()
                .build(),
        ],
        ..Catalog::default()
    }
}

fn sqlite_service(catalog: &Catalog) -> (tempfile::TempDir, ListingSearchService) {
    let (temp_dir, config) = create_temp_database();
    let store = SqliteListingStore::open(&config).unwrap();
    store.import_catalog(catalog).unwrap();

    let service = ListingSearchService::new(Arc::new(store), DEFAULT_KEYWORD);
    (temp_dir, service)
}

fn ids(results: &motohub_search::SearchResults) -> Vec<i32> {
    results.listings.iter().map(|card| card.id).collect()
}

#[tokio::test]
async fn test_keyword_matches_title_model_or_maker() {
    let (_temp_dir, service) = sqlite_service(&honda_catalog());

    let rebel = service.search(Some("REBEL")).await.unwrap();
    assert_eq!(ids(&rebel), vec![2, 1]);

    let honda = service.search(Some("honda")).await.unwrap();
    assert_eq!(ids(&honda), vec![3, 2]);
}

#[tokio::test]
async fn test_sold_out_never_returned() {
    let (_temp_dir, service) = sqlite_service(&honda_catalog());

    let results = service.search(Some("sold")).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_blank_keyword_searches_default() {
    let (_temp_dir, service) = sqlite_service(&honda_catalog());

    let results = service.search(Some("  ")).await.unwrap();
    assert_eq!(results.keyword, "Rebel 250");
    assert_eq!(ids(&results), vec![2, 1]);
}

#[tokio::test]
async fn test_results_capped_and_stable() {
    let mut catalog = Catalog {
        sites: sites(),
        ..Catalog::default()
    };
    catalog.listings = (1..=75)
        .map(|id| {
            ListingBuilder::new(id)
                .title("Rebel 250")
                .created_at(minutes_after_epoch((id % 10) as u32))
                .build()
        })
        .collect();
    let (_temp_dir, service) = sqlite_service(&catalog);

    let first = service.search(None).await.unwrap();
    let second = service.search(None).await.unwrap();

    assert_eq!(first.len(), MAX_SEARCH_RESULTS);
    assert_eq!(first, second);
    // Newest minute first, ties broken by highest id
    assert_eq!(&ids(&first)[..3], &[69, 59, 49]);
}

#[tokio::test]
async fn test_like_wildcards_are_literal() {
    let mut catalog = Catalog {
        sites: sites(),
        ..Catalog::default()
    };
    catalog.listings = vec![
        ListingBuilder::new(1).title("100% 純正").build(),
        ListingBuilder::new(2).title("1000cc").build(),
        ListingBuilder::new(3).title("GSX_R").build(),
        ListingBuilder::new(4).title("GSX-R").build(),
    ];
    let (_temp_dir, service) = sqlite_service(&catalog);

    assert_eq!(ids(&service.search(Some("100%")).await.unwrap()), vec![1]);
    assert_eq!(ids(&service.search(Some("GSX_")).await.unwrap()), vec![3]);
    assert_eq!(service.search(Some("%")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_formatting_from_database() {
    let mut catalog = honda_catalog();
    catalog.listings[1].total_price = Some(1_234_500);
    catalog.listings[1].model_year = Some(2019);
    let (_temp_dir, service) = sqlite_service(&catalog);

    let results = service.search(Some("Rebel 250")).await.unwrap();
    let card = &results.listings[0];

    assert_eq!(card.id, 2);
    assert_eq!(card.source_id, "bds");
    assert_eq!(card.maker, "Honda");
    assert_eq!(card.total_price, "123.5");
    assert_eq!(card.year, "2019年");
    assert_eq!(card.displacement, "250cc");
    assert_eq!(card.store_name, "個人出品等");
    assert_eq!(card.store_address, "");
}

#[test]
fn test_seeded_database_has_reference_sites() {
    let (_temp_dir, config) = create_temp_database();
    let store = SqliteListingStore::open(&config).unwrap();

    let summary = store.seed_reference_data().unwrap();
    assert_eq!(summary.sites, 2);
    assert!(summary.manufacturers > 40);

    // Seeding does not create listings
    let records = store
        .search_listings(&motohub_core::ListingQuery::new("ホンダ"))
        .unwrap();
    assert!(records.is_empty());
}
