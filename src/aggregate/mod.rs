//! Aggregation layer
//!
//! Turns flat transaction lists into monthly maps, smoothed averages and tier
//! rollups. Everything here is pure and synchronous.

pub mod averaging;
pub mod monthly;
pub mod tiers;

pub use averaging::{mean, IqrTrim, ThresholdAverage, ThresholdTrim};
pub use monthly::{monthly_by_category, running_net_worth, MonthlyTotals, NetWorthStep};
pub use tiers::{group_of, rollup, tier_of, RollupGroup};
