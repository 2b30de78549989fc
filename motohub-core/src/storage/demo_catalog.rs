//! Small built-in catalog served in development mode.
//!
//! Covers the cases the listing page has to render: complete listings,
//! listings without a shop, model, year or price, and a sold-out listing
//! that must never show up.

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{BikeModel, Catalog, ExternalId, Listing, Manufacturer, Shop, Site};

/// Builds the demo catalog.
pub fn demo_catalog() -> Catalog {
    Catalog {
        manufacturers: vec![
            manufacturer(1, "ホンダ"),
            manufacturer(2, "ヤマハ"),
            manufacturer(3, "カワサキ"),
            manufacturer(4, "スズキ"),
        ],
        models: vec![
            model(1, 1, "Rebel 250", Some(250), "アメリカン"),
            model(2, 1, "CB400 SUPER FOUR", Some(400), "ネイキッド"),
            model(3, 2, "YZF-R25", Some(250), "スポーツ"),
            model(4, 3, "Ninja 400", Some(399), "スポーツ"),
            model(5, 4, "SV650", None, "ネイキッド"),
        ],
        shops: vec![
            Shop {
                id: 1,
                name: "バイクショップ湘南".to_string(),
                prefecture: Some("神奈川県".to_string()),
                address: Some("神奈川県藤沢市辻堂1-2-3".to_string()),
                phone: Some("0466-00-0000".to_string()),
                website_url: None,
                latitude: Some(35.3200),
                longitude: Some(139.4500),
            },
            Shop {
                id: 2,
                name: "モトガレージ多摩".to_string(),
                prefecture: Some("東京都".to_string()),
                address: None,
                phone: None,
                website_url: Some("https://example.com/tama".to_string()),
                latitude: None,
                longitude: None,
            },
        ],
        sites: vec![
            Site {
                id: 1,
                name: "GooBike".to_string(),
                base_url: Some("https://www.goobike.com".to_string()),
            },
            Site {
                id: 2,
                name: "BDS".to_string(),
                base_url: Some("https://www.bds-bikesensor.net".to_string()),
            },
        ],
        listings: vec![
            Listing {
                price: Some(548_000),
                total_price: Some(598_000),
                model_year: Some(2023),
                mileage: Some(1_200),
                image_urls: vec!["https://picsum.photos/seed/rebel-1/640/480".to_string()],
                ..listing(1, Some(1), Some(1), 1, "ホンダ Rebel 250 ABS 低走行", listed_at(10, 9))
            },
            Listing {
                price: Some(489_000),
                total_price: Some(1_234_500),
                model_year: Some(2019),
                mileage: Some(15_400),
                local_image_paths: vec!["listing_images/rebel-2.jpg".to_string()],
                ..listing(2, Some(1), Some(2), 2, "Rebel250 カスタム多数", listed_at(9, 18))
            },
            Listing {
                price: Some(530_000),
                mileage: Some(0),
                ..listing(3, Some(1), None, 1, "レブル250 Sエディション", listed_at(9, 12))
            },
            Listing {
                price: Some(420_000),
                total_price: Some(455_000),
                is_sold_out: true,
                ..listing(4, Some(1), Some(1), 2, "Rebel 250 売約済み", listed_at(11, 8))
            },
            Listing {
                price: Some(690_000),
                total_price: Some(735_000),
                model_year: Some(2021),
                mileage: Some(8_900),
                ..listing(5, Some(2), Some(2), 1, "CB400SF Revo", listed_at(8, 15))
            },
            Listing {
                price: Some(598_000),
                total_price: Some(640_000),
                model_year: Some(2022),
                mileage: Some(3_300),
                ..listing(6, Some(3), Some(1), 2, "YZF-R25 ワンオーナー", listed_at(7, 10))
            },
            Listing {
                price: Some(720_000),
                total_price: Some(770_000),
                model_year: Some(2020),
                mileage: Some(11_000),
                ..listing(7, Some(4), None, 1, "Ninja400 ETC付き", listed_at(6, 11))
            },
            Listing {
                model_year: Some(2018),
                ..listing(8, Some(5), Some(2), 2, "SV650 ABS", None)
            },
            Listing {
                price: Some(150_000),
                ..listing(9, None, None, 1, "ホンダ 部品取り車", listed_at(5, 9))
            },
        ],
        model_identifiers: vec![
            external_id(1, 1, 1, "1000082"),
            external_id(2, 1, 2, "rebel250"),
            external_id(3, 3, 1, "1003571"),
        ],
        shop_identifiers: vec![
            external_id(1, 1, 1, "8200345"),
            external_id(2, 2, 2, "tama-garage"),
        ],
    }
}

fn manufacturer(id: i32, name: &str) -> Manufacturer {
    Manufacturer {
        id,
        name: name.to_string(),
        name_kana: Some(name.to_string()),
        country: Some("日本".to_string()),
    }
}

fn model(
    id: i32,
    manufacturer_id: i32,
    name: &str,
    displacement: Option<i32>,
    category: &str,
) -> BikeModel {
    BikeModel {
        id,
        manufacturer_id,
        name: name.to_string(),
        displacement,
        category: Some(category.to_string()),
    }
}

fn listing(
    id: i32,
    bike_model_id: Option<i32>,
    shop_id: Option<i32>,
    site_id: i32,
    title: &str,
    created_at: Option<NaiveDateTime>,
) -> Listing {
    Listing {
        id,
        bike_model_id,
        shop_id,
        site_id,
        title: Some(title.to_string()),
        source_url: format!("https://example.com/listings/{id}"),
        price: None,
        total_price: None,
        model_year: None,
        mileage: None,
        image_urls: Vec::new(),
        local_image_paths: Vec::new(),
        is_sold_out: false,
        created_at,
        updated_at: created_at,
    }
}

fn external_id(id: i32, owner_id: i32, site_id: i32, identifier: &str) -> ExternalId {
    ExternalId {
        id,
        owner_id,
        site_id,
        identifier: identifier.to_string(),
    }
}

fn listed_at(day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2026, 1, day).and_then(|date| date.and_hms_opt(hour, 0, 0))
}
