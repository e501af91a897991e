//! Net worth over time
//!
//! One point per date with balance sheet activity. With a date range the
//! running balances start from zero at the range start.

use chrono::NaiveDate;
use serde::Serialize;

use super::ReportContext;
use crate::aggregate::running_net_worth;
use crate::models::round_money;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthPoint {
    pub date: NaiveDate,
    pub assets: f64,
    pub liabilities: f64,
    pub net_worth: f64,
}

pub fn net_worth_over_time(ctx: &ReportContext) -> Vec<NetWorthPoint> {
    running_net_worth(&ctx.transactions)
        .into_iter()
        .map(|step| NetWorthPoint {
            date: step.date,
            assets: round_money(step.assets),
            liabilities: round_money(step.liabilities),
            net_worth: round_money(step.net_worth()),
        })
        .collect()
}
