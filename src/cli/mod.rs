//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod cache;
pub mod detail;
pub mod report;
pub mod settings;

pub use cache::{handle_cache_command, CacheCommands};
pub use detail::{handle_detail_command, DetailCommands};
pub use report::{handle_report_command, ReportKind};
pub use settings::{handle_depth_command, handle_tier_command, TierCommands};

use clap::Args;
use serde::Serialize;

use crate::error::{MintedError, MintedResult};
use crate::models::DateRange;

/// Optional `[start, end)` bound shared by report and detail commands
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// First day excluded (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,
}

impl RangeArgs {
    /// Both bounds, or neither
    pub fn range(&self) -> MintedResult<Option<DateRange>> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => DateRange::parse(start, end).map(Some),
            (None, None) => Ok(None),
            _ => Err(MintedError::Validation(
                "--start and --end must be given together".into(),
            )),
        }
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> MintedResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
