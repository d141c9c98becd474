//! Expense repository (expenses.json)

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::BudgetError;
use crate::models::{Expense, ExpenseId, Money, PeriodId};

use super::repository::{Record, Repository};

impl Record for Expense {
    type Id = ExpenseId;
    type SortKey = (NaiveDate, DateTime<Utc>);

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.recorded_on, self.created_at)
    }
}

pub type ExpenseRepository = Repository<Expense>;

impl Repository<Expense> {
    pub fn for_period(&self, period_id: PeriodId) -> Result<Vec<Expense>, BudgetError> {
        self.filter(|e| e.period_id == period_id)
    }

    /// Sum of every expense in a period
    pub fn total_for_period(&self, period_id: PeriodId) -> Result<Money, BudgetError> {
        Ok(self.for_period(period_id)?.iter().map(|e| e.amount).sum())
    }
}
