//! SQLite-backed listing store.

use chrono::Utc;
use diesel::prelude::*;

use super::connection::{DbConnection, DbPool, establish_pool, motohub_lower};
use super::models::{
    BikeModelRow, ListingRow, ManufacturerRow, NewBikeModel, NewBikeModelIdentifier,
    NewListing, NewManufacturer, NewShop, NewShopIdentifier, NewSite, ShopRow, SiteRow,
};
use super::schema::{
    bike_model_identifiers, bike_models, listings, manufacturers, shop_identifiers, shops, sites,
};
use super::seed::{SeedSummary, seed_reference_data};
use super::{ListingStore, StorageError, StorageResult};
use crate::catalog::{BikeModel, Catalog, ListingQuery, ListingRecord, Shop};
use crate::config::DatabaseConfig;

type JoinedListingRow = (
    ListingRow,
    Option<BikeModelRow>,
    Option<ManufacturerRow>,
    Option<ShopRow>,
    Option<SiteRow>,
);

/// Listing store reading from a pooled SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteListingStore {
    pool: DbPool,
}

impl SqliteListingStore {
    /// Opens the database described by `config`, applying pending migrations.
    ///
    /// # Errors
    ///
    /// - `StorageError::Pool` - If the database cannot be opened
    /// - `StorageError::Migration` - If the schema cannot be brought up to date
    pub fn open(config: &DatabaseConfig) -> StorageResult<Self> {
        Ok(Self::from_pool(establish_pool(config)?))
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    fn connection(&self) -> StorageResult<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Inserts the reference sites and manufacturers if missing.
    ///
    /// # Errors
    ///
    /// - `StorageError::Query` - If an insert fails
    pub fn seed_reference_data(&self) -> StorageResult<SeedSummary> {
        let mut conn = self.connection()?;
        let summary = seed_reference_data(&mut conn)?;

        tracing::info!(
            sites = summary.sites,
            manufacturers = summary.manufacturers,
            "Seeded reference data"
        );
        Ok(summary)
    }

    /// Writes every row of `catalog` in one transaction, keeping its ids.
    ///
    /// Returns the number of listings written. Meant for empty databases:
    /// conflicting ids or names abort the whole import.
    ///
    /// # Errors
    ///
    /// - `StorageError::Query` - If any insert fails
    /// - `StorageError::Serialization` - If a listing's path lists cannot be encoded
    pub fn import_catalog(&self, catalog: &Catalog) -> StorageResult<usize> {
        let mut conn = self.connection()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, StorageError, _>(|conn| {
            for site in &catalog.sites {
                diesel::insert_into(sites::table)
                    .values(&NewSite {
                        id: Some(site.id),
                        name: &site.name,
                        base_url: site.base_url.as_deref(),
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            for maker in &catalog.manufacturers {
                diesel::insert_into(manufacturers::table)
                    .values(&NewManufacturer {
                        id: Some(maker.id),
                        name: &maker.name,
                        name_kana: maker.name_kana.as_deref(),
                        country: maker.country.as_deref(),
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            for model in &catalog.models {
                diesel::insert_into(bike_models::table)
                    .values(&NewBikeModel {
                        id: model.id,
                        manufacturer_id: model.manufacturer_id,
                        name: &model.name,
                        displacement: model.displacement,
                        category: model.category.as_deref(),
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            for shop in &catalog.shops {
                diesel::insert_into(shops::table)
                    .values(&NewShop {
                        id: shop.id,
                        name: &shop.name,
                        prefecture: shop.prefecture.as_deref(),
                        address: shop.address.as_deref(),
                        phone: shop.phone.as_deref(),
                        website_url: shop.website_url.as_deref(),
                        latitude: shop.latitude,
                        longitude: shop.longitude,
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            for listing in &catalog.listings {
                diesel::insert_into(listings::table)
                    .values(&NewListing::from_listing(listing)?)
                    .execute(conn)?;
            }

            for ext in &catalog.model_identifiers {
                diesel::insert_into(bike_model_identifiers::table)
                    .values(&NewBikeModelIdentifier {
                        id: ext.id,
                        bike_model_id: ext.owner_id,
                        site_id: ext.site_id,
                        identifier: &ext.identifier,
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            for ext in &catalog.shop_identifiers {
                diesel::insert_into(shop_identifiers::table)
                    .values(&NewShopIdentifier {
                        id: ext.id,
                        shop_id: ext.owner_id,
                        site_id: ext.site_id,
                        identifier: &ext.identifier,
                        created_at: now,
                        updated_at: now,
                    })
                    .execute(conn)?;
            }

            Ok(())
        })?;

        tracing::info!(listings = catalog.listings.len(), "Imported catalog");
        Ok(catalog.listings.len())
    }
}

impl ListingStore for SqliteListingStore {
    fn search_listings(&self, query: &ListingQuery) -> StorageResult<Vec<ListingRecord>> {
        let mut conn = self.connection()?;
        let pattern = query.like_pattern();
        let limit = i64::try_from(query.limit()).unwrap_or(i64::MAX);

        let rows: Vec<JoinedListingRow> = listings::table
            .left_join(bike_models::table.left_join(manufacturers::table))
            .left_join(shops::table)
            .left_join(sites::table)
            .filter(listings::is_sold_out.eq(false))
            .filter(
                motohub_lower(listings::title)
                    .like(&pattern)
                    .escape('\\')
                    .or(motohub_lower(bike_models::name.nullable())
                        .like(&pattern)
                        .escape('\\'))
                    .or(motohub_lower(manufacturers::name.nullable())
                        .like(&pattern)
                        .escape('\\')),
            )
            .order((listings::created_at.desc(), listings::id.desc()))
            .limit(limit)
            .select((
                ListingRow::as_select(),
                Option::<BikeModelRow>::as_select(),
                Option::<ManufacturerRow>::as_select(),
                Option::<ShopRow>::as_select(),
                Option::<SiteRow>::as_select(),
            ))
            .load(&mut conn)?;

        tracing::debug!(
            keyword = query.keyword(),
            matched = rows.len(),
            "SQLite listing search"
        );

        Ok(rows
            .into_iter()
            .map(|(listing, model, manufacturer, shop, site)| ListingRecord {
                listing: listing.into(),
                model: model.map(Into::into),
                manufacturer: manufacturer.map(Into::into),
                shop: shop.map(Into::into),
                site: site.map(Into::into),
            })
            .collect())
    }

    fn model_by_external_id(
        &self,
        site: &str,
        identifier: &str,
    ) -> StorageResult<Option<BikeModel>> {
        let mut conn = self.connection()?;

        let row = bike_model_identifiers::table
            .inner_join(bike_models::table)
            .inner_join(sites::table)
            .filter(sites::name.eq(site))
            .filter(bike_model_identifiers::identifier.eq(identifier))
            .select(BikeModelRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn shop_by_external_id(&self, site: &str, identifier: &str) -> StorageResult<Option<Shop>> {
        let mut conn = self.connection()?;

        let row = shop_identifiers::table
            .inner_join(shops::table)
            .inner_join(sites::table)
            .filter(sites::name.eq(site))
            .filter(shop_identifiers::identifier.eq(identifier))
            .select(ShopRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }
}
