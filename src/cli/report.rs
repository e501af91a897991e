//! CLI commands for reports
//!
//! Without a date range the cache is rebuilt once and the report read from
//! it; with a range the filtered path recomputes just that report.

use clap::ValueEnum;

use super::{print_json, RangeArgs};
use crate::display::format_budget_table;
use crate::error::MintedResult;
use crate::services::DashboardService;

/// Report kinds
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Budget,
    BudgetHistory,
    IncomeHistory,
    TierHistory,
    MonthlyMetrics,
    CategorySpending,
    IncomeBreakdown,
    #[value(alias = "networth")]
    NetWorth,
    CategoryTrends,
    #[value(alias = "yoy")]
    YearOverYear,
    Summary,
    Accounts,
    Transactions,
}

/// Handle `minted report`
pub fn handle_report_command(
    service: &DashboardService,
    kind: ReportKind,
    range: &RangeArgs,
    table: bool,
) -> MintedResult<()> {
    let range = range.range()?;
    if range.is_none() {
        service.rebuild_cache()?;
    }

    match kind {
        ReportKind::Budget => {
            let items = service.budget(range)?;
            if table {
                print!("{}", format_budget_table(&items));
                Ok(())
            } else {
                print_json(&items)
            }
        }
        ReportKind::BudgetHistory => print_json(&service.budget_history(range)?),
        ReportKind::IncomeHistory => print_json(&service.income_history(range)?),
        ReportKind::TierHistory => print_json(&service.tier_history(range)?),
        ReportKind::MonthlyMetrics => print_json(&service.monthly_metrics(range)?),
        ReportKind::CategorySpending => print_json(&service.category_spending(range)?),
        ReportKind::IncomeBreakdown => print_json(&service.income_breakdown(range)?),
        ReportKind::NetWorth => print_json(&service.net_worth_over_time(range)?),
        ReportKind::CategoryTrends => print_json(&service.category_trends(range)?),
        ReportKind::YearOverYear => print_json(&service.year_over_year(range)?),
        ReportKind::Summary => print_json(&service.summary(range)?),
        ReportKind::Accounts => print_json(&service.accounts(range)?),
        ReportKind::Transactions => print_json(&service.transactions(range)?),
    }
}
