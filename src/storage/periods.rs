//! Period repository (periods.json)

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::error::BudgetError;
use crate::models::{Period, PeriodId, PeriodKind, PeriodStatus};

use super::repository::{Record, Repository};

impl Record for Period {
    type Id = PeriodId;
    type SortKey = (Reverse<NaiveDate>, PeriodKind);

    fn id(&self) -> PeriodId {
        self.id
    }

    /// Newest first
    fn sort_key(&self) -> Self::SortKey {
        (Reverse(self.start), self.kind)
    }
}

pub type PeriodRepository = Repository<Period>;

impl Repository<Period> {
    pub fn active(&self, kind: PeriodKind) -> Result<Option<Period>, BudgetError> {
        self.find(|p| p.kind == kind && p.status == PeriodStatus::Active)
    }

    /// The closed period of `kind` that ended most recently
    pub fn latest_closed(&self, kind: PeriodKind) -> Result<Option<Period>, BudgetError> {
        Ok(self
            .filter(|p| p.kind == kind && p.status == PeriodStatus::Closed)?
            .into_iter()
            .max_by_key(|p| p.end))
    }

    /// A period of `kind`, any status, whose end date falls in `start..=end`
    pub fn ending_within(
        &self,
        kind: PeriodKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Period>, BudgetError> {
        self.find(|p| p.kind == kind && p.end >= start && p.end <= end)
    }
}
