//! Expense service
//!
//! Holds the expenses of the period being viewed. Every mutation validates
//! before reaching the backend, and the cache is updated from the backend's
//! response by id.

use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Expense, ExpenseId, ExpenseUpdate, NewExpense, PeriodId};
use crate::storage::{Backend, ExpenseFilter};

/// Service for expense management
pub struct ExpenseService<'a> {
    backend: &'a dyn Backend,
    expenses: Vec<Expense>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            expenses: Vec::new(),
        }
    }

    /// Fetch the expenses of a period, optionally of one category, replacing the cache
    pub fn fetch(
        &mut self,
        period_id: PeriodId,
        category_id: Option<CategoryId>,
    ) -> BudgetResult<&[Expense]> {
        let mut filter = ExpenseFilter::period(period_id);
        filter.category_id = category_id;
        self.expenses = self.backend.list_expenses(&filter)?;
        debug!(period = %period_id, count = self.expenses.len(), "fetched expenses");
        Ok(&self.expenses)
    }

    /// Fetch every expense regardless of period, replacing the cache
    pub fn fetch_all(&mut self) -> BudgetResult<&[Expense]> {
        self.expenses = self.backend.list_expenses(&ExpenseFilter::default())?;
        Ok(&self.expenses)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Resolve a cached expense by full or short id
    pub fn find(&self, identifier: &str) -> BudgetResult<&Expense> {
        self.expenses
            .iter()
            .find(|e| e.id.matches(identifier))
            .ok_or_else(|| BudgetError::expense_not_found(identifier))
    }

    pub fn create(&mut self, period_id: PeriodId, new: &NewExpense) -> BudgetResult<Expense> {
        new.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let created = self.backend.create_expense(period_id, new)?;
        info!(expense = %created.id, amount = %created.amount, "created expense");
        self.expenses.push(created.clone());
        Ok(created)
    }

    pub fn update(&mut self, id: ExpenseId, update: &ExpenseUpdate) -> BudgetResult<Expense> {
        if update.is_empty() {
            return Err(BudgetError::Validation("Nothing to update".into()));
        }
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let updated = self.backend.update_expense(id, update)?;
        if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete an expense and drop exactly that record from the cache
    pub fn delete(&mut self, id: ExpenseId) -> BudgetResult<()> {
        self.backend.delete_expense(id)?;
        if let Some(pos) = self.expenses.iter().position(|e| e.id == id) {
            self.expenses.remove(pos);
        }
        info!(expense = %id, "deleted expense");
        Ok(())
    }
}
