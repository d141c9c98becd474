//! Data-access seam
//!
//! Every read and mutation the stores perform goes through [`Backend`].
//! The crate ships the JSON-file [`Storage`](super::Storage); a remote
//! implementation would map each method onto one resource call.

use chrono::NaiveDate;

use crate::error::BudgetResult;
use crate::models::{
    Aporte, AporteId, AporteUpdate, Category, CategoryId, CategoryUpdate, Expense, ExpenseId,
    ExpenseKind, ExpenseUpdate, NewAporte, NewExpense, NewPeriod, Period, PeriodId, PeriodKind,
    PeriodStatus, PeriodUpdate,
};

/// Period list filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub kind: Option<PeriodKind>,
    pub status: Option<PeriodStatus>,
}

impl PeriodFilter {
    pub fn matches(&self, period: &Period) -> bool {
        self.kind.map_or(true, |k| period.kind == k)
            && self.status.map_or(true, |s| period.status == s)
    }
}

/// Expense list filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub period_id: Option<PeriodId>,
    pub category_id: Option<CategoryId>,
    pub kind: Option<ExpenseKind>,
}

impl ExpenseFilter {
    pub fn period(period_id: PeriodId) -> Self {
        Self {
            period_id: Some(period_id),
            ..Default::default()
        }
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn kind(mut self, kind: ExpenseKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.period_id.map_or(true, |p| expense.period_id == p)
            && self.category_id.map_or(true, |c| expense.category_id == c)
            && self.kind.map_or(true, |k| expense.kind == k)
    }
}

/// Aporte list filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AporteFilter {
    pub period_id: Option<PeriodId>,
    pub category_id: Option<CategoryId>,
    pub is_fixed: Option<bool>,
}

impl AporteFilter {
    pub fn period(period_id: PeriodId) -> Self {
        Self {
            period_id: Some(period_id),
            ..Default::default()
        }
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn matches(&self, aporte: &Aporte) -> bool {
        self.period_id.map_or(true, |p| aporte.period_id == p)
            && self.category_id.map_or(true, |c| aporte.category_id == c)
            && self.is_fixed.map_or(true, |f| aporte.is_fixed == f)
    }
}

/// The resources a budgeting backend exposes
pub trait Backend {
    fn list_categories(&self) -> BudgetResult<Vec<Category>>;

    /// Create the four default categories when missing, returning the full set
    fn init_categories(&self) -> BudgetResult<Vec<Category>>;

    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> BudgetResult<Category>;

    /// Periods, newest first
    fn list_periods(&self, filter: &PeriodFilter) -> BudgetResult<Vec<Period>>;

    fn get_period(&self, id: PeriodId) -> BudgetResult<Period>;

    /// The active period of `kind`, created (and rolled forward) when missing
    fn active_period(&self, kind: PeriodKind) -> BudgetResult<Period>;

    fn create_period(&self, new: &NewPeriod) -> BudgetResult<Period>;

    fn update_period(&self, id: PeriodId, update: &PeriodUpdate) -> BudgetResult<Period>;

    /// Mark a period closed, optionally moving its end date
    fn close_period(&self, id: PeriodId, end: Option<NaiveDate>) -> BudgetResult<Period>;

    fn list_expenses(&self, filter: &ExpenseFilter) -> BudgetResult<Vec<Expense>>;

    fn create_expense(&self, period_id: PeriodId, new: &NewExpense) -> BudgetResult<Expense>;

    fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> BudgetResult<Expense>;

    fn delete_expense(&self, id: ExpenseId) -> BudgetResult<()>;

    fn list_aportes(&self, filter: &AporteFilter) -> BudgetResult<Vec<Aporte>>;

    fn create_aporte(&self, period_id: PeriodId, new: &NewAporte) -> BudgetResult<Aporte>;

    fn update_aporte(&self, id: AporteId, update: &AporteUpdate) -> BudgetResult<Aporte>;

    fn delete_aporte(&self, id: AporteId) -> BudgetResult<()>;
}
