//! CLI command implementations

use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use motohub_core::storage::{demo_catalog, migrate_database};
use motohub_core::{MotohubConfig, RuntimeMode, SqliteListingStore};
use motohub_search::ListingSearchService;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Runtime mode: production reads the database, development serves demo data
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
    },
    /// Search listings from the terminal
    Search {
        /// Keyword to search; blank searches the default keyword
        keyword: Option<String>,
        /// Runtime mode: production reads the database, development serves demo data
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply pending database migrations
    Migrate {
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
    },
    /// Insert reference sites and manufacturers
    Seed {
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
        /// Import the demo catalog instead (empty databases only)
        #[arg(long)]
        demo: bool,
    },
    /// Resolve a site's native identifier to a catalog entry
    Lookup {
        /// Kind of entity the identifier belongs to
        #[arg(long, value_enum)]
        kind: LookupKind,
        /// Site name, e.g. GooBike
        #[arg(long)]
        site: String,
        /// Site-native identifier
        #[arg(long)]
        identifier: String,
        /// Runtime mode: production reads the database, development serves demo data
        #[arg(long, default_value = "production")]
        mode: RuntimeMode,
        /// SQLite database path
        #[arg(long)]
        database: Option<String>,
    },
}

/// Entity kinds that carry site-native identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKind {
    /// Bike model
    Model,
    /// Dealer shop
    Shop,
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of the command that failed, with context
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = MotohubConfig::load().context("Invalid MotoHub configuration")?;

    match command {
        Commands::Server {
            host,
            port,
            mode,
            database,
        } => {
            let mut config = with_database(config, database);
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            start_server(config, mode).await
        }
        Commands::Search {
            keyword,
            mode,
            database,
            json,
        } => search(with_database(config, database), mode, keyword, json).await,
        Commands::Migrate { database } => migrate(&with_database(config, database)),
        Commands::Seed { database, demo } => seed(&with_database(config, database), demo),
        Commands::Lookup {
            kind,
            site,
            identifier,
            mode,
            database,
        } => lookup(with_database(config, database), mode, kind, &site, &identifier).await,
    }
}

fn with_database(mut config: MotohubConfig, database: Option<String>) -> MotohubConfig {
    if let Some(url) = database {
        config.database.url = url;
    }
    config
}

/// Start the web server
///
/// # Errors
/// - Store could not be opened or the address could not be bound
pub async fn start_server(config: MotohubConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    tracing::info!(
        "Starting MotoHub on {} in {mode} mode",
        config.server.bind_address()
    );
    motohub_web::run_server(config, mode)
        .await
        .context("Web server stopped")
}

/// Search listings and print them
///
/// # Errors
/// - Store could not be opened or the query failed
pub async fn search(
    config: MotohubConfig,
    mode: RuntimeMode,
    keyword: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let service = ListingSearchService::from_runtime_mode(mode, &config)
        .context("Failed to open listing store")?;
    let results = service.search(keyword.as_deref()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("{} listings for \"{}\"", results.len(), results.keyword);
    for card in &results.listings {
        println!(
            "[{}] {} {} | {} | {} | {} | {}万円 | {}",
            card.source, card.maker, card.name, card.year, card.mileage, card.displacement,
            card.total_price, card.store_name
        );
        println!("    {}", card.url);
    }
    Ok(())
}

/// Apply pending migrations
///
/// # Errors
/// - Database could not be opened or a migration failed
pub fn migrate(config: &MotohubConfig) -> anyhow::Result<()> {
    let applied = migrate_database(&config.database.url)
        .with_context(|| format!("Failed to migrate {}", config.database.url))?;

    if applied == 0 {
        println!("Database schema is up to date");
    } else {
        println!("Applied {applied} migration(s) to {}", config.database.url);
    }
    Ok(())
}

/// Seed reference data or import the demo catalog
///
/// # Errors
/// - Database could not be opened or an insert failed
pub fn seed(config: &MotohubConfig, demo: bool) -> anyhow::Result<()> {
    let store = SqliteListingStore::open(&config.database)
        .with_context(|| format!("Failed to open {}", config.database.url))?;

    if demo {
        let imported = store
            .import_catalog(&demo_catalog())
            .context("Demo import failed; it requires an empty database")?;
        println!("Imported {imported} demo listings");
    } else {
        let summary = store.seed_reference_data()?;
        println!(
            "Seeded {} site(s) and {} manufacturer(s)",
            summary.sites, summary.manufacturers
        );
    }
    Ok(())
}

/// Resolve a site-native identifier
///
/// # Errors
/// - Store could not be opened or the query failed
pub async fn lookup(
    config: MotohubConfig,
    mode: RuntimeMode,
    kind: LookupKind,
    site: &str,
    identifier: &str,
) -> anyhow::Result<()> {
    let service = ListingSearchService::from_runtime_mode(mode, &config)
        .context("Failed to open listing store")?;

    let found = match kind {
        LookupKind::Model => service
            .model_by_external_id(site, identifier)
            .await?
            .map(|model| format!("Model #{}: {}", model.id, model.name)),
        LookupKind::Shop => service
            .shop_by_external_id(site, identifier)
            .await?
            .map(|shop| format!("Shop #{}: {}", shop.id, shop.name)),
    };

    match found {
        Some(entry) => println!("{entry}"),
        None => println!("No {kind:?} registered for {site} identifier {identifier}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_search_command() {
        let cli = TestCli::parse_from(["motohub", "search", "CB400", "--json"]);

        match cli.command {
            Commands::Search {
                keyword,
                mode,
                json,
                ..
            } => {
                assert_eq!(keyword.as_deref(), Some("CB400"));
                assert_eq!(mode, RuntimeMode::Development);
                assert!(json);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_lookup_command() {
        let cli = TestCli::parse_from([
            "motohub",
            "lookup",
            "--kind",
            "shop",
            "--site",
            "GooBike",
            "--identifier",
            "8200345",
        ]);

        match cli.command {
            Commands::Lookup { kind, mode, .. } => {
                assert_eq!(kind, LookupKind::Shop);
                assert_eq!(mode, RuntimeMode::Production);
            }
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn test_database_flag_overrides_config() {
        let config = with_database(MotohubConfig::default(), Some("other.db".to_string()));
        assert_eq!(config.database.url, "other.db");

        let config = with_database(MotohubConfig::default(), None);
        assert_eq!(config.database.url, "motohub.db");
    }
}
