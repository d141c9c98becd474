//! Period summary formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::PeriodSummary;
use crate::services::summary::salary_share;

use super::MoneyFormat;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Fixed")]
    fixed: String,
    #[tabled(rename = "Variable")]
    variable: String,
    #[tabled(rename = "Contributions")]
    contributions: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Of salary")]
    of_salary: String,
}

/// Format the dashboard of a period
pub fn format_summary(summary: &PeriodSummary, fmt: &MoneyFormat) -> String {
    let period = &summary.period;
    let mut output = String::new();

    output.push_str(&format!(
        "Period: {} to {} ({}, {})\n",
        period.start, period.end, period.kind, period.status
    ));
    output.push_str(&format!("Salary: {}\n\n", fmt.money(period.salary)));

    if summary.categories.is_empty() {
        output.push_str("No categories found.\n\nRun 'cyclebudget init' to create them.\n");
        return output;
    }

    let rows = summary.categories.iter().map(|c| SummaryRow {
        name: c.name.clone(),
        fixed: fmt.money(c.total_fixed),
        variable: fmt.money(c.total_variable),
        contributions: fmt.money(c.total_contributions),
        total: fmt.money(c.total_real),
        goal: c.goal.map(|g| fmt.money(g)).unwrap_or_else(|| "-".to_string()),
        available: fmt.money(c.available),
        used: format!("{}%", c.percent_used),
        of_salary: format!("{}%", salary_share(c.total_real, period.salary)),
    });

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    output.push_str(&table);
    output.push_str("\n\n");

    output.push_str(&format!(
        "Previous credit debt: {}\n",
        fmt.money(summary.previous_credit_debt)
    ));
    output.push_str(&format!("Liquidity:            {}\n", fmt.money(summary.liquidity)));
    output.push_str(&format!(
        "Available liquidity:  {}\n",
        fmt.money(summary.available_liquidity)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategorySlug, Money, Period, PeriodKind};
    use crate::services::summary::summarize_category;
    use chrono::NaiveDate;

    #[test]
    fn test_format_summary() {
        let mut period = Period::new(
            PeriodKind::Monthly,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        );
        period.salary = Money::new(1_000_000);
        let savings = Category::from_slug(CategorySlug::Savings);

        let summary = PeriodSummary {
            period,
            categories: vec![summarize_category(&savings, &[], &[], None)],
            liquidity: Money::new(1_000_000),
            available_liquidity: Money::new(1_000_000),
            previous_credit_debt: Money::zero(),
        };

        let output = format_summary(&summary, &MoneyFormat::default());
        assert!(output.contains("2025-03-01 to 2025-03-31"));
        assert!(output.contains("$1.000.000"));
        assert!(output.contains(&savings.name));
        assert!(output.contains("Available liquidity"));
    }
}
