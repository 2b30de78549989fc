//! Diesel row types and their conversions into catalog types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::StorageError;
use super::schema::*;
use crate::catalog::{BikeModel, Listing, Manufacturer, Shop, Site};

// Manufacturer models
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = manufacturers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ManufacturerRow {
    pub id: i32,
    pub name: String,
    pub name_kana: Option<String>,
    pub country: Option<String>,
}

impl From<ManufacturerRow> for Manufacturer {
    fn from(row: ManufacturerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            name_kana: row.name_kana,
            country: row.country,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = manufacturers)]
pub struct NewManufacturer<'a> {
    pub id: Option<i32>,
    pub name: &'a str,
    pub name_kana: Option<&'a str>,
    pub country: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Bike model models
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bike_models)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BikeModelRow {
    pub id: i32,
    pub manufacturer_id: i32,
    pub name: String,
    pub displacement: Option<i32>,
    pub category: Option<String>,
}

impl From<BikeModelRow> for BikeModel {
    fn from(row: BikeModelRow) -> Self {
        Self {
            id: row.id,
            manufacturer_id: row.manufacturer_id,
            name: row.name,
            displacement: row.displacement,
            category: row.category,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = bike_models)]
pub struct NewBikeModel<'a> {
    pub id: i32,
    pub manufacturer_id: i32,
    pub name: &'a str,
    pub displacement: Option<i32>,
    pub category: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Shop models
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shops)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShopRow {
    pub id: i32,
    pub name: String,
    pub prefecture: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            prefecture: row.prefecture,
            address: row.address,
            phone: row.phone,
            website_url: row.website_url,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = shops)]
pub struct NewShop<'a> {
    pub id: i32,
    pub name: &'a str,
    pub prefecture: Option<&'a str>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub website_url: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Site models
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sites)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SiteRow {
    pub id: i32,
    pub name: String,
    pub base_url: Option<String>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            base_url: row.base_url,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sites)]
pub struct NewSite<'a> {
    pub id: Option<i32>,
    pub name: &'a str,
    pub base_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Listing models
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListingRow {
    pub id: i32,
    pub bike_model_id: Option<i32>,
    pub shop_id: Option<i32>,
    pub site_id: i32,
    pub title: Option<String>,
    pub source_url: String,
    pub price: Option<i64>,
    pub total_price: Option<i64>,
    pub model_year: Option<i32>,
    pub mileage: Option<i32>,
    pub image_urls: Option<String>,        // JSON array
    pub local_image_paths: Option<String>, // JSON array
    pub is_sold_out: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        let image_urls = decode_path_list(row.id, "image_urls", row.image_urls.as_deref());
        let local_image_paths =
            decode_path_list(row.id, "local_image_paths", row.local_image_paths.as_deref());

        Self {
            id: row.id,
            bike_model_id: row.bike_model_id,
            shop_id: row.shop_id,
            site_id: row.site_id,
            title: row.title,
            source_url: row.source_url,
            price: row.price,
            total_price: row.total_price,
            model_year: row.model_year,
            mileage: row.mileage,
            image_urls,
            local_image_paths,
            is_sold_out: row.is_sold_out,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = listings)]
pub struct NewListing<'a> {
    pub id: i32,
    pub bike_model_id: Option<i32>,
    pub shop_id: Option<i32>,
    pub site_id: i32,
    pub title: Option<&'a str>,
    pub source_url: &'a str,
    pub price: Option<i64>,
    pub total_price: Option<i64>,
    pub model_year: Option<i32>,
    pub mileage: Option<i32>,
    pub image_urls: String,
    pub local_image_paths: String,
    pub is_sold_out: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl<'a> NewListing<'a> {
    /// Builds an insertable row, encoding the path lists as JSON arrays.
    ///
    /// # Errors
    ///
    /// - `StorageError::Serialization` - If a path list cannot be encoded
    pub fn from_listing(listing: &'a Listing) -> Result<Self, StorageError> {
        Ok(Self {
            id: listing.id,
            bike_model_id: listing.bike_model_id,
            shop_id: listing.shop_id,
            site_id: listing.site_id,
            title: listing.title.as_deref(),
            source_url: &listing.source_url,
            price: listing.price,
            total_price: listing.total_price,
            model_year: listing.model_year,
            mileage: listing.mileage,
            image_urls: serde_json::to_string(&listing.image_urls)?,
            local_image_paths: serde_json::to_string(&listing.local_image_paths)?,
            is_sold_out: listing.is_sold_out,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        })
    }
}

// External identifier models
#[derive(Debug, Insertable)]
#[diesel(table_name = bike_model_identifiers)]
pub struct NewBikeModelIdentifier<'a> {
    pub id: i32,
    pub bike_model_id: i32,
    pub site_id: i32,
    pub identifier: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = shop_identifiers)]
pub struct NewShopIdentifier<'a> {
    pub id: i32,
    pub shop_id: i32,
    pub site_id: i32,
    pub identifier: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Decodes a JSON array column, treating NULL and malformed values as empty.
fn decode_path_list(listing_id: i32, column: &str, raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(paths) => paths.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(listing_id, column, "Ignoring malformed JSON list: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_path_list() {
        assert_eq!(
            decode_path_list(1, "image_urls", Some(r#"["a.jpg","b.jpg"]"#)),
            vec!["a.jpg".to_string(), "b.jpg".to_string()]
        );
        assert!(decode_path_list(1, "image_urls", None).is_empty());
        assert!(decode_path_list(1, "image_urls", Some("not json")).is_empty());
        assert!(decode_path_list(1, "image_urls", Some("null")).is_empty());
    }
}
