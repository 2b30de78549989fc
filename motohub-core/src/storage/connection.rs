//! Pooled SQLite connections with embedded migrations.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::{Nullable, Text};
use diesel::{Connection, SqliteConnection, define_sql_function};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use super::StorageError;
use crate::config::DatabaseConfig;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY_URL: &str = ":memory:";

define_sql_function! {
    /// Unicode-aware lowercase. SQLite's own `lower()` and `LIKE` fold ASCII only.
    fn motohub_lower(text: Nullable<Text>) -> Nullable<Text>;
}

/// Registers the application SQL functions on a raw connection.
///
/// # Errors
///
/// - `diesel::result::Error` - If SQLite rejects the function registration
pub fn register_sql_functions(conn: &mut SqliteConnection) -> diesel::QueryResult<()> {
    motohub_lower_utils::register_impl(conn, |text: Option<String>| {
        text.map(|text| text.to_lowercase())
    })
}

/// Applies per-connection SQLite settings every time the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // Foreign keys are off by default in SQLite and the delete policies rely on them
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)?;
        register_sql_functions(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Pool sizing derived from the database URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PoolSettings {
    max_size: u32,
    /// Keep connections open forever instead of letting r2d2 recycle them
    pinned: bool,
}

impl PoolSettings {
    /// An in-memory database lives and dies with its one connection, so the
    /// pool is capped at one and that connection is never reaped.
    fn for_config(config: &DatabaseConfig) -> Self {
        if config.url == IN_MEMORY_URL {
            Self {
                max_size: 1,
                pinned: true,
            }
        } else {
            Self {
                max_size: config.max_connections.max(1),
                pinned: false,
            }
        }
    }
}

/// Opens a connection pool and brings the schema up to date.
///
/// # Errors
///
/// - `StorageError::Pool` - If the pool cannot open its connections
/// - `StorageError::Migration` - If a pending migration fails
pub fn establish_pool(config: &DatabaseConfig) -> Result<DbPool, StorageError> {
    let settings = PoolSettings::for_config(config);

    let mut builder = Pool::builder()
        .max_size(settings.max_size)
        .connection_customizer(Box::new(SqlitePragmas));
    if settings.pinned {
        builder = builder.idle_timeout(None).max_lifetime(None);
    }

    let manager = ConnectionManager::<SqliteConnection>::new(&config.url);
    let pool = builder.build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    tracing::debug!(url = %config.url, max_size = settings.max_size, "Opened listing database");
    Ok(pool)
}

/// Opens a single connection to `url` and applies pending migrations.
///
/// # Errors
///
/// - `StorageError::Connection` - If the database cannot be opened
/// - `StorageError::Migration` - If a migration fails to apply
pub fn migrate_database(url: &str) -> Result<usize, StorageError> {
    let mut conn = SqliteConnection::establish(url)?;
    run_migrations(&mut conn)
}

/// Runs every migration that has not been applied yet.
///
/// # Errors
///
/// - `StorageError::Migration` - If a migration fails to apply
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<usize, StorageError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::Migration {
            reason: e.to_string(),
        })?;

    for version in &applied {
        tracing::info!("Applied migration {version}");
    }
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use diesel::prelude::*;
    use diesel::sql_types::Integer;

    use super::*;

    #[derive(QueryableByName)]
    struct PragmaValue {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn test_pool_enables_foreign_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: temp_dir.path().join("test.db").display().to_string(),
            max_connections: 2,
        };

        let pool = establish_pool(&config).unwrap();
        let mut conn = pool.get().unwrap();

        let value: PragmaValue = diesel::sql_query("PRAGMA foreign_keys")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(value.foreign_keys, 1);
    }

    #[derive(QueryableByName)]
    struct Folded {
        #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
        folded: Option<String>,
    }

    #[test]
    fn test_pool_registers_unicode_lower() {
        let config = DatabaseConfig {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
        };
        let pool = establish_pool(&config).unwrap();
        let mut conn = pool.get().unwrap();

        let row: Folded = diesel::sql_query("SELECT motohub_lower('ＲＥＢＥＬ ÉDITION') AS folded")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.folded.as_deref(), Some("ｒｅｂｅｌ édition"));

        let row: Folded = diesel::sql_query("SELECT motohub_lower(NULL) AS folded")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.folded, None);
    }

    #[test]
    fn test_in_memory_pool_is_pinned() {
        let memory = DatabaseConfig {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 8,
        };
        assert_eq!(
            PoolSettings::for_config(&memory),
            PoolSettings {
                max_size: 1,
                pinned: true
            }
        );

        let file = DatabaseConfig {
            url: "motohub.db".to_string(),
            max_connections: 0,
        };
        assert_eq!(
            PoolSettings::for_config(&file),
            PoolSettings {
                max_size: 1,
                pinned: false
            }
        );
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let config = DatabaseConfig {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 8,
        };

        let pool = establish_pool(&config).unwrap();
        assert_eq!(pool.max_size(), 1);

        let mut conn = pool.get().unwrap();
        assert_eq!(run_migrations(&mut conn).unwrap(), 0);
    }
}
