//! Derived summaries. Never persisted.

use serde::{Deserialize, Serialize};

use super::category::CategorySlug;
use super::ids::CategoryId;
use super::money::Money;
use super::period::Period;

/// Totals of one category over one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    pub slug: CategorySlug,
    pub name: String,
    pub total_fixed: Money,
    pub total_variable: Money,
    pub total_expenses: Money,
    pub total_contributions: Money,
    /// Expenses minus contributions; expenses alone for credit
    pub total_real: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Money>,
    pub available: Money,
    pub percent_used: i64,
}

/// Dashboard view of a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub categories: Vec<CategorySummary>,
    pub liquidity: Money,
    pub available_liquidity: Money,
    pub previous_credit_debt: Money,
}

impl PeriodSummary {
    pub fn category(&self, slug: CategorySlug) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// total_real of a category, zero when absent
    pub fn total_real(&self, slug: CategorySlug) -> Money {
        self.category(slug).map(|c| c.total_real).unwrap_or_default()
    }
}
