//! Core data models for cyclebudget
//!
//! Periods, the four categories, expenses, contributions (aportes) and the
//! derived summaries.

pub mod aporte;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod summary;

pub use aporte::{Aporte, AporteUpdate, NewAporte};
pub use category::{Category, CategorySlug, CategoryUpdate, CategoryValidationError};
pub use expense::{Expense, ExpenseKind, ExpenseUpdate, ExpenseValidationError, NewExpense};
pub use ids::{AporteId, CategoryId, ExpenseId, PeriodId};
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use period::{
    CategoryGoals, NewPeriod, Period, PeriodKind, PeriodStatus, PeriodUpdate,
    PeriodValidationError,
};
pub use summary::{CategorySummary, PeriodSummary};
