//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod aporte;
pub mod category;
pub mod expense;
pub mod period;

pub use aporte::{handle_aporte_command, AporteCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use period::{handle_period_command, PeriodCommands};

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Money, Period, PeriodKind};
use crate::services::PeriodService;

/// Parse an amount argument
pub(crate) fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD argument
pub(crate) fn parse_date(input: &str) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", input)))
}

/// The period a category's items belong to
///
/// An explicit period wins; otherwise credit items go to the active credit
/// cycle and everything else to the active month.
pub(crate) fn period_for_category(
    periods: &mut PeriodService<'_>,
    category: &Category,
    explicit: Option<&str>,
) -> BudgetResult<Period> {
    match explicit {
        Some(identifier) => periods.resolve(identifier),
        None if category.is_credit() => periods.active(PeriodKind::CreditCycle),
        None => periods.active(PeriodKind::Monthly),
    }
}
