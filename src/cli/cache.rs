//! Cache CLI commands

use clap::Subcommand;

use super::print_json;
use crate::display::format_cache_status;
use crate::error::MintedResult;
use crate::services::DashboardService;

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache metadata
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rebuild every cached report
    Refresh {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Handle a cache command
pub fn handle_cache_command(service: &DashboardService, cmd: CacheCommands) -> MintedResult<()> {
    let json = match cmd {
        CacheCommands::Status { json } => json,
        CacheCommands::Refresh { json } => {
            let snapshot = service.rebuild_cache()?;
            if !json {
                println!(
                    "Rebuilt report cache over {} transactions.",
                    snapshot.reports.transactions.len()
                );
            }
            json
        }
    };

    let status = service.cache_status()?;
    if json {
        print_json(&status)
    } else {
        print!("{}", format_cache_status(&status));
        Ok(())
    }
}
