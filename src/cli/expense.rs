//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_list, MoneyFormat};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseKind, ExpenseUpdate};
use crate::services::{CategoryService, ExpenseService, PeriodService};
use crate::storage::Backend;
use crate::ui::ExpenseForm;

use super::{parse_amount, period_for_category};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Category (savings, rent, credit, liquidity)
        category: String,
        /// Name
        name: String,
        /// Amount (e.g. 25.000)
        amount: String,
        /// Fixed expense, copied into the next period
        #[arg(long)]
        fixed: bool,
        /// Installments left (a temporary fixed expense)
        #[arg(short, long)]
        installments: Option<u32>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Period ID (defaults to the category's active period)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only this kind (fixed or variable)
        #[arg(short, long)]
        kind: Option<String>,
        /// Period ID (defaults to the category's active period)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Edit an expense
    Edit {
        /// Expense ID
        expense: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    backend: &dyn Backend,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let mut categories = CategoryService::new(backend);
    let mut periods = PeriodService::new(backend);
    let mut service = ExpenseService::new(backend);
    let fmt = MoneyFormat::new(settings);
    categories.fetch()?;

    match cmd {
        ExpenseCommands::Add {
            category,
            name,
            amount,
            fixed,
            installments,
            description,
            period,
        } => {
            let category = categories.find(&category)?.clone();
            let is_fixed = fixed || installments.is_some();
            let form = ExpenseForm {
                kind: if is_fixed {
                    ExpenseKind::Fixed
                } else {
                    ExpenseKind::Variable
                },
                name,
                amount,
                is_permanent: installments.is_none(),
                remaining_installments: installments.map(|n| n.to_string()).unwrap_or_default(),
                description: description.unwrap_or_default(),
                error_message: None,
            };
            let new = form
                .build_expense(category.id)
                .map_err(BudgetError::Validation)?;

            let period = period_for_category(&mut periods, &category, period.as_deref())?;
            let expense = service.create(period.id, &new)?;

            println!("Recorded expense: {} {}", expense.name, fmt.money(expense.amount));
            println!("  Category: {}", category.name);
            println!("  Type:     {}", expense.label());
            println!("  Period:   {}", period);
            println!("  ID:       {}", expense.id);
        }

        ExpenseCommands::List {
            category,
            kind,
            period,
        } => {
            let category = category
                .as_deref()
                .map(|c| categories.find(c).cloned())
                .transpose()?;
            let period = match &category {
                Some(c) => period_for_category(&mut periods, c, period.as_deref())?,
                None => periods.resolve(period.as_deref().unwrap_or("monthly"))?,
            };
            let kind = kind
                .as_deref()
                .map(|k| {
                    k.parse::<ExpenseKind>()
                        .map_err(|e| BudgetError::Validation(e.to_string()))
                })
                .transpose()?;

            let expenses: Vec<_> = service
                .fetch(period.id, category.as_ref().map(|c| c.id))?
                .iter()
                .filter(|e| kind.map_or(true, |k| e.kind == k))
                .cloned()
                .collect();

            println!("Period: {}", period);
            println!(
                "{}",
                format_expense_list(&expenses, categories.categories(), &fmt)
            );
        }

        ExpenseCommands::Edit {
            expense,
            name,
            amount,
            description,
        } => {
            service.fetch_all()?;
            let id = service.find(&expense)?.id;
            let update = ExpenseUpdate {
                name,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
            };
            let updated = service.update(id, &update)?;
            println!("Updated expense: {} {}", updated.name, fmt.money(updated.amount));
        }

        ExpenseCommands::Delete { expense } => {
            service.fetch_all()?;
            let found = service.find(&expense)?.clone();
            service.delete(found.id)?;
            println!("Deleted expense: {} {}", found.name, fmt.money(found.amount));
        }
    }

    Ok(())
}
