//! Expense and contribution tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Aporte, Category, CategoryId, Expense, Money};

use super::MoneyFormat;

fn category_name(categories: &[Category], id: CategoryId) -> String {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "(unknown)".to_string())
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn render(rows: Vec<ItemRow>, total: Money, fmt: &MoneyFormat) -> String {
    let count = rows.len();
    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&format!("\n{} item(s), total {}", count, fmt.money(total)));
    output
}

/// Format expenses as a table
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &[Category],
    fmt: &MoneyFormat,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ItemRow {
            id: e.id.short(),
            date: e.recorded_on.to_string(),
            category: category_name(categories, e.category_id),
            name: e.name.clone(),
            label: e.label(),
            amount: fmt.money(e.amount),
        })
        .collect();

    render(rows, expenses.iter().map(|e| e.amount).sum(), fmt)
}

/// Format contributions as a table
pub fn format_aporte_list(
    aportes: &[Aporte],
    categories: &[Category],
    fmt: &MoneyFormat,
) -> String {
    if aportes.is_empty() {
        return "No contributions found.".to_string();
    }

    let rows = aportes
        .iter()
        .map(|a| ItemRow {
            id: a.id.short(),
            date: a.recorded_on.to_string(),
            category: category_name(categories, a.category_id),
            name: a.name.clone(),
            label: a.label().to_string(),
            amount: fmt.money(a.amount),
        })
        .collect();

    render(rows, aportes.iter().map(|a| a.amount).sum(), fmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySlug, NewExpense, PeriodId};
    use chrono::NaiveDate;

    #[test]
    fn test_expense_list() {
        let savings = Category::from_slug(CategorySlug::Savings);
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let expenses = vec![
            Expense::from_new(
                PeriodId::new(),
                &NewExpense::permanent(savings.id, "Fund", Money::new(200_000)),
                date,
            ),
            Expense::from_new(
                PeriodId::new(),
                &NewExpense::variable(CategoryId::new(), "Pizza", Money::new(15_000)),
                date,
            ),
        ];

        let output = format_expense_list(&expenses, &[savings.clone()], &MoneyFormat::default());
        assert!(output.contains("Fund"));
        assert!(output.contains(&savings.name));
        assert!(output.contains("(unknown)"));
        assert!(output.contains("2 item(s), total $215.000"));
    }

    #[test]
    fn test_empty_lists() {
        let fmt = MoneyFormat::default();
        assert_eq!(format_expense_list(&[], &[], &fmt), "No expenses found.");
        assert_eq!(format_aporte_list(&[], &[], &fmt), "No contributions found.");
    }
}
