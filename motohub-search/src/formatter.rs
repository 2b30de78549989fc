//! Display formatting for listing search results.
//!
//! Turns a joined `ListingRecord` into the strings the listing page and the
//! JSON API show. Missing data never fails formatting; every field has a
//! placeholder.

use motohub_core::ListingRecord;
use serde::{Deserialize, Serialize};

/// Placeholder for an unknown site or manufacturer.
pub const UNKNOWN: &str = "不明";
/// Placeholder for a missing model year.
pub const UNKNOWN_YEAR: &str = "年式不明";
/// Placeholder for a missing mileage.
pub const UNKNOWN_MILEAGE: &str = "走行不明";
/// Placeholder for a listing without a dealer.
pub const PRIVATE_SELLER: &str = "個人出品等";
/// Placeholder for missing displacement or price.
pub const NOT_AVAILABLE: &str = "-";
/// Source id used when the site is missing.
pub const OTHER_SOURCE_ID: &str = "other";

/// Display-ready view of a single listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCard {
    /// Listing id
    pub id: i32,
    /// Lower-cased site name, used for badge styling
    pub source_id: String,
    /// Site name
    pub source: String,
    /// Manufacturer name
    pub maker: String,
    /// Listing title, falling back to the model name
    pub name: String,
    /// Model year such as `2023年`
    pub year: String,
    /// Odometer reading such as `15,400km`
    pub mileage: String,
    /// Engine displacement such as `250cc`
    pub displacement: String,
    /// Total payment in 万円 with one decimal
    pub total_price: String,
    /// Vehicle price in 万円 with one decimal
    pub base_price: String,
    /// Dealer name
    pub store_name: String,
    /// Dealer prefecture
    pub store_address: String,
    /// Listing page on the source site
    pub url: String,
    /// Image URLs in source order
    pub images: Vec<String>,
}

impl From<&ListingRecord> for ListingCard {
    fn from(record: &ListingRecord) -> Self {
        let listing = &record.listing;
        let site_name = record.site.as_ref().map(|s| s.name.as_str());

        Self {
            id: listing.id,
            source_id: site_name
                .map(str::to_ascii_lowercase)
                .unwrap_or_else(|| OTHER_SOURCE_ID.to_string()),
            source: site_name.unwrap_or(UNKNOWN).to_string(),
            maker: record
                .manufacturer
                .as_ref()
                .map_or(UNKNOWN, |m| m.name.as_str())
                .to_string(),
            name: listing
                .title
                .as_deref()
                .or_else(|| record.model.as_ref().map(|m| m.name.as_str()))
                .unwrap_or_default()
                .to_string(),
            year: present(listing.model_year)
                .map_or_else(|| UNKNOWN_YEAR.to_string(), |year| format!("{year}年")),
            mileage: present(listing.mileage).map_or_else(
                || UNKNOWN_MILEAGE.to_string(),
                |km| format!("{}km", group_thousands(i64::from(km))),
            ),
            displacement: present(record.model.as_ref().and_then(|m| m.displacement))
                .map_or_else(|| NOT_AVAILABLE.to_string(), |cc| format!("{cc}cc")),
            total_price: price_or_placeholder(listing.total_price),
            base_price: price_or_placeholder(listing.price),
            store_name: record
                .shop
                .as_ref()
                .map_or(PRIVATE_SELLER, |s| s.name.as_str())
                .to_string(),
            store_address: record
                .shop
                .as_ref()
                .and_then(|s| s.prefecture.clone())
                .unwrap_or_default(),
            url: listing.source_url.clone(),
            images: listing.image_urls.clone(),
        }
    }
}

impl From<ListingRecord> for ListingCard {
    fn from(record: ListingRecord) -> Self {
        Self::from(&record)
    }
}

/// Zero counts as missing for every numeric display field.
fn present<T: Copy + Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

fn price_or_placeholder(yen: Option<i64>) -> String {
    present(yen).map_or_else(|| NOT_AVAILABLE.to_string(), format_man_yen)
}

/// Formats an integer with `,` between groups of three digits.
///
/// # Examples
/// ```
/// use motohub_search::formatter::group_thousands;
///
/// assert_eq!(group_thousands(15400), "15,400");
/// assert_eq!(group_thousands(-1234567), "-1,234,567");
/// ```
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a yen amount in 万円 (10,000 yen) with one decimal place.
///
/// Rounds half away from zero on the exact integer amount, so no floating
/// point error creeps in.
///
/// # Examples
/// ```
/// use motohub_search::formatter::format_man_yen;
///
/// assert_eq!(format_man_yen(1_234_500), "123.5");
/// assert_eq!(format_man_yen(123_456_789), "12,345.7");
/// ```
pub fn format_man_yen(yen: i64) -> String {
    let magnitude = yen.unsigned_abs();
    let mut tenths = magnitude / 1_000;
    if magnitude % 1_000 >= 500 {
        tenths += 1;
    }

    let whole = group_thousands(i64::try_from(tenths / 10).unwrap_or(i64::MAX));
    let sign = if yen < 0 && tenths > 0 { "-" } else { "" };
    format!("{sign}{whole}.{}", tenths % 10)
}

#[cfg(test)]
mod tests {
    use motohub_core::{BikeModel, Manufacturer, Shop, Site};
    use motohub_core::storage::test_fixtures::ListingBuilder;
    use proptest::prelude::*;

    use super::*;

    fn bare_record() -> ListingRecord {
        ListingRecord {
            listing: ListingBuilder::new(42).build(),
            model: None,
            manufacturer: None,
            shop: None,
            site: None,
        }
    }

    fn full_record() -> ListingRecord {
        let mut listing = ListingBuilder::new(1)
            .title("ホンダ Rebel 250 ABS")
            .model(1)
            .shop(1)
            .total_price(598_000)
            .build();
        listing.price = Some(548_000);
        listing.model_year = Some(2023);
        listing.mileage = Some(15_400);
        listing.image_urls = vec!["a.jpg".to_string(), "b.jpg".to_string()];

        ListingRecord {
            listing,
            model: Some(BikeModel {
                id: 1,
                manufacturer_id: 1,
                name: "Rebel 250".to_string(),
                displacement: Some(250),
                category: None,
            }),
            manufacturer: Some(Manufacturer {
                id: 1,
                name: "ホンダ".to_string(),
                name_kana: None,
                country: None,
            }),
            shop: Some(Shop {
                id: 1,
                name: "バイクショップ湘南".to_string(),
                prefecture: Some("神奈川県".to_string()),
                address: None,
                phone: None,
                website_url: None,
                latitude: None,
                longitude: None,
            }),
            site: Some(Site {
                id: 1,
                name: "GooBike".to_string(),
                base_url: None,
            }),
        }
    }

    #[test]
    fn test_full_record() {
        let card = ListingCard::from(&full_record());

        assert_eq!(card.id, 1);
        assert_eq!(card.source_id, "goobike");
        assert_eq!(card.source, "GooBike");
        assert_eq!(card.maker, "ホンダ");
        assert_eq!(card.name, "ホンダ Rebel 250 ABS");
        assert_eq!(card.year, "2023年");
        assert_eq!(card.mileage, "15,400km");
        assert_eq!(card.displacement, "250cc");
        assert_eq!(card.total_price, "59.8");
        assert_eq!(card.base_price, "54.8");
        assert_eq!(card.store_name, "バイクショップ湘南");
        assert_eq!(card.store_address, "神奈川県");
        assert_eq!(card.url, "https://example.com/listings/1");
        assert_eq!(card.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_missing_relations_use_placeholders() {
        let card = ListingCard::from(&bare_record());

        assert_eq!(card.source_id, "other");
        assert_eq!(card.source, "不明");
        assert_eq!(card.maker, "不明");
        assert_eq!(card.name, "");
        assert_eq!(card.year, "年式不明");
        assert_eq!(card.mileage, "走行不明");
        assert_eq!(card.displacement, "-");
        assert_eq!(card.total_price, "-");
        assert_eq!(card.base_price, "-");
        assert_eq!(card.store_name, "個人出品等");
        assert_eq!(card.store_address, "");
        assert!(card.images.is_empty());
    }

    #[test]
    fn test_zero_values_count_as_missing() {
        let mut record = full_record();
        record.listing.model_year = Some(0);
        record.listing.mileage = Some(0);
        record.listing.total_price = Some(0);
        record.listing.price = Some(0);
        if let Some(model) = record.model.as_mut() {
            model.displacement = Some(0);
        }

        let card = ListingCard::from(&record);
        assert_eq!(card.year, "年式不明");
        assert_eq!(card.mileage, "走行不明");
        assert_eq!(card.displacement, "-");
        assert_eq!(card.total_price, "-");
        assert_eq!(card.base_price, "-");
    }

    #[test]
    fn test_name_falls_back_to_model() {
        let mut record = full_record();
        record.listing.title = None;

        assert_eq!(ListingCard::from(&record).name, "Rebel 250");
    }

    #[test]
    fn test_shop_without_prefecture() {
        let mut record = full_record();
        if let Some(shop) = record.shop.as_mut() {
            shop.prefecture = None;
        }

        let card = ListingCard::from(&record);
        assert_eq!(card.store_name, "バイクショップ湘南");
        assert_eq!(card.store_address, "");
    }

    #[test]
    fn test_man_yen_rounding() {
        assert_eq!(format_man_yen(1_234_500), "123.5");
        assert_eq!(format_man_yen(1_234_499), "123.4");
        assert_eq!(format_man_yen(123_456_789), "12,345.7");
        assert_eq!(format_man_yen(5_000), "0.5");
        assert_eq!(format_man_yen(400), "0.0");
        assert_eq!(format_man_yen(99_950), "10.0");
        assert_eq!(format_man_yen(-1_234_500), "-123.5");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_card_serializes_field_names() {
        let value = serde_json::to_value(ListingCard::from(&full_record())).unwrap();

        assert_eq!(value["total_price"], "59.8");
        assert_eq!(value["store_name"], "バイクショップ湘南");
        assert_eq!(value["images"][0], "a.jpg");
    }

    proptest! {
        #[test]
        fn prop_grouping_preserves_digits(value in any::<i64>()) {
            let grouped = group_thousands(value);
            prop_assert_eq!(grouped.replace(',', ""), value.to_string());
        }

        #[test]
        fn prop_man_yen_is_within_half_a_tenth(yen in 0i64..10_000_000_000) {
            let formatted = format_man_yen(yen);
            let (whole, tenth) = formatted.split_once('.').unwrap();
            prop_assert_eq!(tenth.len(), 1);

            let tenths: i64 = format!("{}{}", whole.replace(',', ""), tenth).parse().unwrap();
            let diff = tenths * 1_000 - yen;
            prop_assert!((-500..=500).contains(&diff), "yen={} formatted={}", yen, formatted);
        }
    }
}
