//! TrackEase CLI entry point.
//!
//! Each subcommand corresponds to a screen of the mobile app: the command
//! loads its collections, derives its view with `trackease-core`, and
//! issues mutations through `trackease-store`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trackease_store::{Store, StoreConfig};

mod commands;
mod receipt;

use commands::{
    onboard::{InitArgs, ResetArgs},
    product::ProductCommand,
    report::{DashboardArgs, InventoryArgs, ReportArgs},
    sale::{PaymentsCommand, SellArgs},
    settings::SettingsCommand,
    CliResult,
};

#[derive(Parser)]
#[command(name = "trackease")]
#[command(version)]
#[command(about = "Point-of-sale and inventory tracking for small businesses")]
struct Cli {
    /// Directory holding the local store (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a new business (onboarding)
    Init(InitArgs),

    /// Today's sales, top sellers and stock warnings
    Dashboard(DashboardArgs),

    /// Manage products
    Product(ProductCommand),

    /// Record a sale and print the receipt
    Sell(SellArgs),

    /// Outstanding (Pay Later) payments
    Payments(PaymentsCommand),

    /// Daily, weekly or monthly sales report
    Report(ReportArgs),

    /// Stock overview
    Inventory(InventoryArgs),

    /// Business settings and categories
    Settings(SettingsCommand),

    /// Erase all data and start over
    Reset(ResetArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult {
    let cli = Cli::parse();

    let store = Store::open(StoreConfig::new(store_path(cli.data_dir)?)).await?;

    // Everything except onboarding and reset needs a business to exist,
    // the same way the app routes to the onboarding screen first.
    if !matches!(cli.command, Commands::Init(_) | Commands::Reset(_))
        && !store.has_launched().await
    {
        return Err("no business set up yet - run `trackease init` first".into());
    }

    match cli.command {
        Commands::Init(args) => commands::onboard::init(&store, args).await,
        Commands::Dashboard(args) => commands::report::dashboard(&store, args).await,
        Commands::Product(cmd) => commands::product::run(&store, cmd).await,
        Commands::Sell(args) => commands::sale::sell(&store, args).await,
        Commands::Payments(cmd) => commands::sale::payments(&store, cmd).await,
        Commands::Report(args) => commands::report::report(&store, args).await,
        Commands::Inventory(args) => commands::report::inventory(&store, args).await,
        Commands::Settings(cmd) => commands::settings::run(&store, cmd).await,
        Commands::Reset(args) => commands::onboard::reset(&store, args).await,
    }
}

/// Resolves the store file path, creating the data directory if needed.
fn store_path(data_dir: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .ok_or("could not determine the platform data directory")?
            .join("trackease"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("trackease.db"))
}
