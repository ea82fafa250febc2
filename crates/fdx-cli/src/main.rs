//! CLI application for financial document extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{address, batch, config, extract, ledger, measure};

/// Financial document extraction - pull amounts, dates and vendors from document text
#[derive(Parser)]
#[command(name = "fdx")]
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
    /// Extract financial data from a single document
    Extract(extract::ExtractArgs),

    /// Extract financial data from multiple documents
    Batch(batch::BatchArgs),

    /// Inspect saved document history
    Ledger(ledger::LedgerArgs),

    /// Measure property boundaries
    Measure(measure::MeasureArgs),

    /// Parse a one-line street address
    Address(address::AddressArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Ledger(args) => ledger::run(args, config_path).await,
        Commands::Measure(args) => measure::run(args).await,
        Commands::Address(args) => address::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
