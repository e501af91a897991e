use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use minted::cli::{
    handle_cache_command, handle_depth_command, handle_detail_command, handle_report_command,
    handle_tier_command, CacheCommands, DetailCommands, RangeArgs, ReportKind, TierCommands,
};
use minted::config::{MintedPaths, Settings};
use minted::ledger::HledgerCli;
use minted::services::DashboardService;

#[derive(Parser)]
#[command(
    name = "minted",
    version,
    about = "Personal finance reports over an hledger journal",
    long_about = "Minted reads an hledger journal and turns it into budget, spending, \
                  income and net worth reports. Reports are printed as JSON."
)]
struct Cli {
    /// hledger executable
    #[arg(long, global = true, env = "MINTED_HLEDGER", default_value = "hledger")]
    hledger: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one report
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[command(flatten)]
        range: RangeArgs,
        /// Print a table instead of JSON (budget only)
        #[arg(long)]
        table: bool,
    },

    /// Detail view of one category, tier, account or income source
    #[command(subcommand)]
    Detail(DetailCommands),

    /// Report cache commands
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Tier management commands
    #[command(subcommand)]
    Tier(TierCommands),

    /// Set how many levels below a category detail breakdowns keep
    Depth {
        depth: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minted=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn dashboard(settings: &Settings, hledger: PathBuf) -> Result<DashboardService> {
    let journal = settings
        .ledger_file()
        .context("No journal configured: set HLEDGER_FILE in settings or LEDGER_FILE")?;
    let ledger = HledgerCli::new(journal).with_binary(hledger);
    Ok(DashboardService::new(Arc::new(ledger), settings.clone()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = MintedPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report { kind, range, table }) => {
            let service = dashboard(&settings, cli.hledger)?;
            handle_report_command(&service, kind, &range, table)?;
        }
        Some(Commands::Detail(cmd)) => {
            let service = dashboard(&settings, cli.hledger)?;
            handle_detail_command(&service, cmd)?;
        }
        Some(Commands::Cache(cmd)) => {
            let service = dashboard(&settings, cli.hledger)?;
            handle_cache_command(&service, cmd)?;
        }
        Some(Commands::Tier(cmd)) => {
            handle_tier_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Depth { depth }) => {
            handle_depth_command(&paths, &mut settings, depth)?;
        }
        Some(Commands::Config) => {
            println!("Minted Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Journal file:     {}",
                settings
                    .ledger_file()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Settings:");
            println!("  Tiers:             {}", settings.tiers.len());
            println!("  Subcategory depth: {}", settings.subcategory_depth);
            println!("  Theme:             {}", settings.theme);
        }
        None => {
            println!("Minted - personal finance reports over an hledger journal");
            println!();
            println!("Run 'minted --help' for usage information.");
        }
    }

    Ok(())
}
