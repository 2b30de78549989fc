//! Reference data every fresh database starts with.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use super::StorageError;
use super::models::{NewManufacturer, NewSite};
use super::schema::{manufacturers, sites};

/// Marketplace sites listings are scraped from: (name, base URL).
pub const SITE_SEEDS: &[(&str, &str)] = &[
    ("GooBike", "https://www.goobike.com"),
    ("BDS", "https://www.bds-bikesensor.net"),
];

/// Manufacturer master list: (name, kana, country).
pub const MANUFACTURER_SEEDS: &[(&str, &str, &str)] = &[
    ("ホンダ", "ホンダ", "日本"),
    ("ヤマハ", "ヤマハ", "日本"),
    ("スズキ", "スズキ", "日本"),
    ("カワサキ", "カワサキ", "日本"),
    ("ハーレーダビッドソン", "ハーレーダビッドソン", "アメリカ"),
    ("インディアン", "インディアン", "アメリカ"),
    ("ヴィクトリー", "ヴィクトリー", "アメリカ"),
    ("ビューエル", "ビューエル", "アメリカ"),
    ("クリーブランドサイクルワークス", "クリーブランドサイクルワークス", "アメリカ"),
    ("ボスホス", "ボスホス", "アメリカ"),
    ("タイタン", "タイタン", "アメリカ"),
    ("トライアンフ", "トライアンフ", "イギリス"),
    ("ロイヤルエンフィールド", "ロイヤルエンフィールド", "イギリス"),
    ("ノートン", "ノートン", "イギリス"),
    ("BSA", "ビーエスエー", "イギリス"),
    ("メティッセ", "メティッセ", "イギリス"),
    ("CCM", "シーシーエム", "イギリス"),
    ("BMW", "ビーエムダブリュー", "ドイツ"),
    ("ゾンダップ", "ゾンダップ", "ドイツ"),
    ("ドゥカティ", "ドゥカティ", "イタリア"),
    ("アプリリア", "アプリリア", "イタリア"),
    ("モトグッツィ", "モトグッツィ", "イタリア"),
    ("ベスパ", "ベスパ", "イタリア"),
    ("MVアグスタ", "エムブイアグスタ", "イタリア"),
    ("ビモータ", "ビモータ", "イタリア"),
    ("ベネリ", "ベネリ", "イタリア"),
    ("カジバ", "カジバ", "イタリア"),
    ("マグニ", "マグニ", "イタリア"),
    ("モンディアル", "モンディアル", "イタリア"),
    ("ピアジオ", "ピアジオ", "イタリア"),
    ("ジレラ", "ジレラ", "イタリア"),
    ("マラグーティ", "マラグーティ", "イタリア"),
    ("イタルジェット", "イタルジェット", "イタリア"),
    ("ファンティック", "ファンティック", "イタリア"),
    ("SWM", "エスダブリューエム", "イタリア"),
    ("KTM", "ケーティーエム", "オーストリア"),
    ("ハスクバーナ", "ハスクバーナ", "オーストリア"),
    ("プジョー", "プジョー", "フランス"),
    ("シェルコ", "シェルコ", "フランス"),
    ("スコルパ", "スコルパ", "フランス"),
    ("ガスガス", "ガスガス", "スペイン"),
    ("デルビ", "デルビ", "スペイン"),
    ("モンテッサ", "モンテッサ", "スペイン"),
    ("リエジュ", "リエジュ", "スペイン"),
    ("キムコ", "キムコ", "台湾"),
    ("SYM", "エスワイエム", "台湾"),
    ("PGO", "ピージーオー", "台湾"),
    ("ハートフォード", "ハートフォード", "台湾"),
    ("ヒョースン", "ヒョースン", "韓国"),
    ("CF MOTO", "シーエフモト", "中国"),
    ("ブリクストン", "ブリクストン", "オーストリア"),
    ("ウラル", "ウラル", "ロシア"),
];

/// Rows written by one seeding run.
///
/// `sites` counts inserted or refreshed sites, so every run reports all of
/// them. `manufacturers` counts new rows only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub sites: usize,
    pub manufacturers: usize,
}

/// Upserts the reference sites and inserts missing manufacturers.
///
/// An existing site keeps its id and gets the seeded `base_url`. Existing
/// manufacturers are left untouched.
///
/// # Errors
///
/// - `StorageError::Query` - If an insert fails
pub fn seed_reference_data(conn: &mut SqliteConnection) -> Result<SeedSummary, StorageError> {
    let now = Utc::now().naive_utc();

    conn.transaction::<_, StorageError, _>(|conn| {
        let mut summary = SeedSummary::default();

        for &(name, base_url) in SITE_SEEDS {
            summary.sites += diesel::insert_into(sites::table)
                .values(&NewSite {
                    id: None,
                    name,
                    base_url: Some(base_url),
                    created_at: now,
                    updated_at: now,
                })
                .on_conflict(sites::name)
                .do_update()
                .set((sites::base_url.eq(base_url), sites::updated_at.eq(now)))
                .execute(conn)?;
        }

        for &(name, kana, country) in MANUFACTURER_SEEDS {
            summary.manufacturers += diesel::insert_or_ignore_into(manufacturers::table)
                .values(&seed_manufacturer(name, kana, country, now))
                .execute(conn)?;
        }

        Ok(summary)
    })
}

fn seed_manufacturer<'a>(
    name: &'a str,
    kana: &'a str,
    country: &'a str,
    now: NaiveDateTime,
) -> NewManufacturer<'a> {
    NewManufacturer {
        id: None,
        name,
        name_kana: Some(kana),
        country: Some(country),
        created_at: now,
        updated_at: now,
    }
}
