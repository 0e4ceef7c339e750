//! CLI application for receipt scanning and warranty tracking.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, items, scan};

/// HomeOps - Extract purchases from receipts and track warranties
#[derive(Parser)]
#[command(name = "homeops")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a purchase draft from scanned receipt text
    Scan(scan::ScanArgs),

    /// Scan multiple receipt text files
    Batch(batch::BatchArgs),

    /// List items with optional filtering and sorting
    List(items::ListArgs),

    /// Show smart collections
    Collections(items::CollectionsArgs),

    /// Show collection analytics and insights
    Analytics(items::AnalyticsArgs),

    /// Show upcoming warranty alerts
    Alerts(items::AlertsArgs),

    /// Compose a warranty claim letter
    Claim(items::ClaimArgs),

    /// List known categories and tags
    Categories(items::CategoriesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Scan(args) => scan::run(args, config_path),
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::List(args) => items::list(args, config_path),
        Commands::Collections(args) => items::collections(args, config_path),
        Commands::Analytics(args) => items::analytics(args, config_path),
        Commands::Alerts(args) => items::alerts(args, config_path),
        Commands::Claim(args) => items::claim(args, config_path),
        Commands::Categories(args) => items::categories(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
