//! Period service
//!
//! Active periods per kind, period edits, and assembly of the period summary
//! from backend data.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Money, Period, PeriodId, PeriodKind, PeriodStatus, PeriodSummary, PeriodUpdate,
};
use crate::storage::{AporteFilter, Backend, ExpenseFilter, PeriodFilter};

use super::summary::{build_period_summary, previous_credit_debt, SummaryInput};

/// Service for period management
pub struct PeriodService<'a> {
    backend: &'a dyn Backend,
    periods: Vec<Period>,
}

impl<'a> PeriodService<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            periods: Vec::new(),
        }
    }

    /// Fetch periods matching `filter`, replacing the cached list
    pub fn fetch(&mut self, filter: &PeriodFilter) -> BudgetResult<&[Period]> {
        self.periods = self.backend.list_periods(filter)?;
        debug!(count = self.periods.len(), "fetched periods");
        Ok(&self.periods)
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// The active period of `kind`; the backend creates it when missing
    pub fn active(&mut self, kind: PeriodKind) -> BudgetResult<Period> {
        let period = self.backend.active_period(kind)?;
        self.replace(&period);
        Ok(period)
    }

    pub fn get(&mut self, id: PeriodId) -> BudgetResult<Period> {
        let period = self.backend.get_period(id)?;
        self.replace(&period);
        Ok(period)
    }

    /// Resolve a period by id, or by `monthly` / `credit` for the active one
    pub fn resolve(&mut self, identifier: &str) -> BudgetResult<Period> {
        if let Ok(kind) = identifier.parse::<PeriodKind>() {
            return self.active(kind);
        }

        if self.periods.is_empty() {
            self.fetch(&PeriodFilter::default())?;
        }
        let id = self
            .periods
            .iter()
            .find(|p| p.id.matches(identifier))
            .map(|p| p.id)
            .ok_or_else(|| BudgetError::period_not_found(identifier))?;
        self.get(id)
    }

    pub fn update(&mut self, id: PeriodId, update: &PeriodUpdate) -> BudgetResult<Period> {
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let period = self.backend.update_period(id, update)?;
        self.replace(&period);
        Ok(period)
    }

    pub fn set_salary(&mut self, id: PeriodId, salary: Money) -> BudgetResult<Period> {
        self.update(id, &PeriodUpdate::salary(salary))
    }

    pub fn set_credit_goal(&mut self, id: PeriodId, goal: Money) -> BudgetResult<Period> {
        self.update(id, &PeriodUpdate::credit_goal(goal))
    }

    /// Record the debt a credit cycle carries into the next month
    pub fn set_total_spent(&mut self, id: PeriodId, total: Money) -> BudgetResult<Period> {
        self.update(id, &PeriodUpdate::total_spent(total))
    }

    pub fn set_status(&mut self, id: PeriodId, status: PeriodStatus) -> BudgetResult<Period> {
        self.update(
            id,
            &PeriodUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn close(&mut self, id: PeriodId, end: Option<NaiveDate>) -> BudgetResult<Period> {
        let period = self.backend.close_period(id, end)?;
        self.replace(&period);
        Ok(period)
    }

    /// Full summary of a period: every category plus liquidity
    pub fn summary(&mut self, id: PeriodId) -> BudgetResult<PeriodSummary> {
        let period = self.get(id)?;
        let categories = self.backend.list_categories()?;
        let expenses = self.backend.list_expenses(&ExpenseFilter::period(period.id))?;
        let aportes = self.backend.list_aportes(&AporteFilter::period(period.id))?;

        let credit_period = if period.kind == PeriodKind::CreditCycle {
            period.clone()
        } else {
            self.active(PeriodKind::CreditCycle)?
        };
        let credit_expenses = if credit_period.id == period.id {
            expenses.clone()
        } else {
            self.backend
                .list_expenses(&ExpenseFilter::period(credit_period.id))?
        };

        let debt = if period.kind == PeriodKind::Monthly {
            let cycles = self.backend.list_periods(&PeriodFilter {
                kind: Some(PeriodKind::CreditCycle),
                status: None,
            })?;
            previous_credit_debt(&cycles, &period)
        } else {
            Money::zero()
        };

        Ok(build_period_summary(&SummaryInput {
            period: &period,
            categories: &categories,
            expenses: &expenses,
            aportes: &aportes,
            credit_period: Some(&credit_period),
            credit_expenses: &credit_expenses,
            previous_credit_debt: debt,
        }))
    }

    fn replace(&mut self, period: &Period) {
        match self.periods.iter_mut().find(|p| p.id == period.id) {
            Some(slot) => *slot = period.clone(),
            None => self.periods.push(period.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySlug, NewAporte, NewExpense};
    use crate::services::test_support::CountingBackend;

    #[test]
    fn test_active_is_cached() {
        let backend = CountingBackend::new();
        let mut service = PeriodService::new(&backend);

        let monthly = service.active(PeriodKind::Monthly).unwrap();
        assert_eq!(service.periods().len(), 1);
        assert_eq!(service.resolve("monthly").unwrap().id, monthly.id);
        assert_eq!(service.resolve(&monthly.id.short()).unwrap().id, monthly.id);
        assert!(service.resolve("per-00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_negative_salary_rejected_before_call() {
        let backend = CountingBackend::new();
        let mut service = PeriodService::new(&backend);
        let monthly = service.active(PeriodKind::Monthly).unwrap();
        let before = backend.calls();

        let result = service.set_salary(monthly.id, Money::new(-1));
        assert!(result.unwrap_err().is_validation());
        assert_eq!(backend.calls(), before);
    }

    #[test]
    fn test_update_replaces_cached_period() {
        let backend = CountingBackend::new();
        let mut service = PeriodService::new(&backend);
        let monthly = service.active(PeriodKind::Monthly).unwrap();

        service.set_salary(monthly.id, Money::new(1_000_000)).unwrap();
        assert_eq!(service.periods().len(), 1);
        assert_eq!(service.periods()[0].salary, Money::new(1_000_000));
    }

    #[test]
    fn test_summary_end_to_end() {
        let backend = CountingBackend::new();
        let storage = backend.storage();
        let savings = storage.categories.get_by_slug(CategorySlug::Savings).unwrap().unwrap();
        let credit = storage.categories.get_by_slug(CategorySlug::Credit).unwrap().unwrap();

        let mut service = PeriodService::new(&backend);
        let monthly = service.active(PeriodKind::Monthly).unwrap();
        let cycle = service.active(PeriodKind::CreditCycle).unwrap();
        service.set_salary(monthly.id, Money::new(1_000_000)).unwrap();
        service.set_credit_goal(cycle.id, Money::new(300_000)).unwrap();

        backend
            .create_expense(
                monthly.id,
                &NewExpense::permanent(savings.id, "Fund", Money::new(200_000)),
            )
            .unwrap();
        backend
            .create_aporte(
                monthly.id,
                &NewAporte::new(savings.id, "Bonus", Money::new(50_000), false),
            )
            .unwrap();
        backend
            .create_expense(
                cycle.id,
                &NewExpense::variable(credit.id, "Groceries", Money::new(100_000)),
            )
            .unwrap();
        backend
            .create_expense(
                cycle.id,
                &NewExpense::variable(credit.id, "Fuel", Money::new(50_000)),
            )
            .unwrap();

        let summary = service.summary(monthly.id).unwrap();
        assert_eq!(summary.total_real(CategorySlug::Savings), Money::new(150_000));

        let credit_summary = summary.category(CategorySlug::Credit).unwrap();
        assert_eq!(credit_summary.available, Money::new(150_000));
        assert_eq!(credit_summary.percent_used, 50);

        // The active cycle (ending 2025-03-24) falls inside March, so its
        // spend counts as debt while no cycle is closed.
        assert_eq!(summary.previous_credit_debt, Money::new(150_000));
        assert_eq!(summary.liquidity, Money::new(700_000));
    }
}
