//! MotoHub CLI - Command-line interface
//!
//! Runs the listing search server and the database maintenance commands.

mod commands;

use anyhow::Context;
use clap::Parser;
use motohub_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "motohub")]
#[command(about = "Used motorcycle listing search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.into(), None).context("Failed to set up logging")?;

    commands::handle_command(cli.command).await
}
