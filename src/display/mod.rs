//! Display formatting for terminal output
//!
//! Table and tree views used by the CLI. Everything else is printed as JSON.

pub mod report;
pub mod tier;

pub use report::{format_budget_table, format_cache_status, format_percentage};
pub use tier::format_tier_tree;
