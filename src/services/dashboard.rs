//! Dashboard
//!
//! Composes the services around the active monthly and credit periods and
//! recomputes the summary after every mutation succeeds.

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Aporte, AporteId, AporteUpdate, CategoryId, CategorySlug, Expense, ExpenseId, ExpenseUpdate,
    Money, NewAporte, NewExpense, Period, PeriodId, PeriodKind, PeriodSummary,
};
use crate::storage::{AporteFilter, Backend, ExpenseFilter};

use super::{AporteService, CategoryService, ExpenseService, PeriodService};

/// Expenses and contributions of one category in its summary period
#[derive(Debug, Clone, Default)]
pub struct CategoryItems {
    pub fixed: Vec<Expense>,
    pub variable: Vec<Expense>,
    pub aportes: Vec<Aporte>,
}

/// The dashboard state for the current month
pub struct Dashboard<'a> {
    backend: &'a dyn Backend,
    pub categories: CategoryService<'a>,
    pub periods: PeriodService<'a>,
    pub expenses: ExpenseService<'a>,
    pub aportes: AporteService<'a>,
    monthly: Option<Period>,
    credit: Option<Period>,
    summary: Option<PeriodSummary>,
}

impl<'a> Dashboard<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            categories: CategoryService::new(backend),
            periods: PeriodService::new(backend),
            expenses: ExpenseService::new(backend),
            aportes: AporteService::new(backend),
            monthly: None,
            credit: None,
            summary: None,
        }
    }

    /// Fetch categories, both active periods and the month's items, then summarize
    pub fn load(&mut self) -> BudgetResult<&PeriodSummary> {
        self.categories.fetch()?;
        let monthly = self.periods.active(PeriodKind::Monthly)?;
        let credit = self.periods.active(PeriodKind::CreditCycle)?;
        self.expenses.fetch(monthly.id, None)?;
        self.aportes.fetch(monthly.id, None)?;
        self.monthly = Some(monthly);
        self.credit = Some(credit);
        self.refresh_summary()
    }

    pub fn monthly(&self) -> BudgetResult<&Period> {
        self.monthly
            .as_ref()
            .ok_or_else(|| BudgetError::Period("Dashboard has not been loaded".into()))
    }

    pub fn credit(&self) -> BudgetResult<&Period> {
        self.credit
            .as_ref()
            .ok_or_else(|| BudgetError::Period("Dashboard has not been loaded".into()))
    }

    pub fn summary(&self) -> Option<&PeriodSummary> {
        self.summary.as_ref()
    }

    /// Recompute the summary of the monthly period from the backend
    pub fn refresh_summary(&mut self) -> BudgetResult<&PeriodSummary> {
        let monthly_id = self.monthly()?.id;
        let credit_id = self.credit()?.id;

        let summary = self.periods.summary(monthly_id)?;
        self.monthly = Some(summary.period.clone());
        self.credit = Some(self.periods.get(credit_id)?);
        debug!(
            liquidity = %summary.liquidity,
            available = %summary.available_liquidity,
            "refreshed summary"
        );

        Ok(&*self.summary.insert(summary))
    }

    /// Credit items live in the credit cycle; everything else in the month
    pub fn period_for(&self, category_id: CategoryId) -> BudgetResult<PeriodId> {
        let is_credit = self
            .categories
            .by_id(category_id)
            .map(|c| c.is_credit())
            .ok_or_else(|| BudgetError::category_not_found(category_id.to_string()))?;

        if is_credit {
            Ok(self.credit()?.id)
        } else {
            Ok(self.monthly()?.id)
        }
    }

    /// Items of a category, fetched from the period it is summarised in
    pub fn category_items(&self, slug: CategorySlug) -> BudgetResult<CategoryItems> {
        let category = self.categories.require(slug)?;
        let period_id = self.period_for(category.id)?;

        let expenses = self
            .backend
            .list_expenses(&ExpenseFilter::period(period_id).category(category.id))?;
        let aportes = if slug.accepts_contributions() {
            self.backend
                .list_aportes(&AporteFilter::period(period_id).category(category.id))?
        } else {
            Vec::new()
        };

        let (fixed, variable) = expenses.into_iter().partition(|e| e.is_fixed());
        Ok(CategoryItems {
            fixed,
            variable,
            aportes,
        })
    }

    pub fn add_expense(&mut self, new: &NewExpense) -> BudgetResult<Expense> {
        let period_id = self.period_for(new.category_id)?;
        let created = self.expenses.create(period_id, new)?;
        self.refresh_summary()?;
        Ok(created)
    }

    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        update: &ExpenseUpdate,
    ) -> BudgetResult<Expense> {
        let updated = self.expenses.update(id, update)?;
        self.refresh_summary()?;
        Ok(updated)
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> BudgetResult<()> {
        self.expenses.delete(id)?;
        self.refresh_summary()?;
        Ok(())
    }

    pub fn add_aporte(&mut self, new: &NewAporte) -> BudgetResult<Aporte> {
        let period_id = self.period_for(new.category_id)?;
        let created = self.aportes.create(period_id, new)?;
        self.refresh_summary()?;
        Ok(created)
    }

    pub fn update_aporte(&mut self, id: AporteId, update: &AporteUpdate) -> BudgetResult<Aporte> {
        let updated = self.aportes.update(id, update)?;
        self.refresh_summary()?;
        Ok(updated)
    }

    pub fn delete_aporte(&mut self, id: AporteId) -> BudgetResult<()> {
        self.aportes.delete(id)?;
        self.refresh_summary()?;
        Ok(())
    }

    pub fn set_salary(&mut self, salary: Money) -> BudgetResult<Period> {
        let id = self.monthly()?.id;
        let period = self.periods.set_salary(id, salary)?;
        self.refresh_summary()?;
        Ok(period)
    }

    pub fn set_credit_goal(&mut self, goal: Money) -> BudgetResult<Period> {
        let id = self.credit()?.id;
        let period = self.periods.set_credit_goal(id, goal)?;
        self.refresh_summary()?;
        Ok(period)
    }
}
