//! Period display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Period;

use super::MoneyFormat;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Spent")]
    spent: String,
}

/// Format a list of periods as a table
pub fn format_period_list(periods: &[Period], fmt: &MoneyFormat) -> String {
    if periods.is_empty() {
        return "No periods found.".to_string();
    }

    let rows = periods.iter().map(|p| PeriodRow {
        id: p.id.short(),
        kind: p.kind.to_string(),
        start: p.start.to_string(),
        end: p.end.to_string(),
        status: p.status.to_string(),
        salary: fmt.money(p.salary),
        spent: fmt.money(p.total_spent),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single period's details
pub fn format_period_details(period: &Period, fmt: &MoneyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Period: {}\n", period));
    output.push_str(&format!("  ID:          {}\n", period.id.short()));
    output.push_str(&format!("  Status:      {}\n", period.status));
    output.push_str(&format!("  Salary:      {}\n", fmt.money(period.salary)));
    output.push_str(&format!("  Credit goal: {}\n", fmt.money(period.goals.credit)));
    output.push_str(&format!("  Spent:       {}\n", fmt.money(period.total_spent)));
    output.push_str(&format!(
        "  Created:     {}\n",
        period.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
