//! Report formatting for terminal output

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::reports::BudgetItem;
use crate::services::CacheStatus;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "This Month")]
    current: String,
    #[tabled(rename = "Average")]
    average: String,
    #[tabled(rename = "Difference")]
    difference: String,
    #[tabled(rename = "% of Avg")]
    percent: String,
    #[tabled(rename = "")]
    status: &'static str,
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format the budget report as a table
pub fn format_budget_table(items: &[BudgetItem]) -> String {
    if items.is_empty() {
        return "No categories with enough history for a budget yet.".to_string();
    }

    let rows = items.iter().map(|item| BudgetRow {
        category: item.category.clone(),
        current: format!("{:.2}", item.current_month),
        average: format!("{:.2}", item.average),
        difference: format!("{:+.2}", item.difference),
        percent: format_percentage(item.percent_of_average),
        status: if item.over_budget { "OVER" } else { "" },
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let over = items.iter().filter(|item| item.over_budget).count();
    format!(
        "{}\n{} of {} categories over their average\n",
        table,
        over,
        items.len()
    )
}

/// Format cache metadata
pub fn format_cache_status(status: &CacheStatus) -> String {
    let mut output = String::new();

    let snapshot = match status.last_refresh {
        Some(at) if status.stale => format!("stale (built {})", at.format("%Y-%m-%d %H:%M:%S UTC")),
        Some(at) => format!("ready (built {})", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => "empty".to_string(),
    };
    output.push_str(&format!("Snapshot:   {}\n", snapshot));
    output.push_str(&format!(
        "Rebuilding: {}\n",
        if status.rebuild_in_progress { "yes" } else { "no" }
    ));
    if status.needs_refresh {
        output.push_str("Run 'minted cache refresh' to rebuild.\n");
    }

    output
}
