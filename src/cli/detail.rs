//! Detail CLI commands

use clap::Subcommand;

use super::{print_json, RangeArgs};
use crate::error::MintedResult;
use crate::services::DashboardService;

/// Detail subcommands
#[derive(Subcommand, Debug)]
pub enum DetailCommands {
    /// Spending in one expense category
    Category {
        /// Category name (second account segment)
        name: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Spending in one tier
    Tier {
        /// Tier name
        name: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Activity and balance history of one account
    Account {
        /// Full account path, e.g. assets:Checking
        name: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// One income source
    Income {
        /// Income source (second account segment)
        name: String,
        #[command(flatten)]
        range: RangeArgs,
    },
}

/// Handle a detail command
pub fn handle_detail_command(service: &DashboardService, cmd: DetailCommands) -> MintedResult<()> {
    match cmd {
        DetailCommands::Category { name, range } => {
            print_json(&service.category_detail(&name, range.range()?)?)
        }
        DetailCommands::Tier { name, range } => {
            print_json(&service.tier_detail(&name, range.range()?)?)
        }
        DetailCommands::Account { name, range } => {
            print_json(&service.account_detail(&name, range.range()?)?)
        }
        DetailCommands::Income { name, range } => {
            print_json(&service.income_detail(&name, range.range()?)?)
        }
    }
}
