//! Aporte repository (aportes.json)

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::BudgetError;
use crate::models::{Aporte, AporteId, PeriodId};

use super::repository::{Record, Repository};

impl Record for Aporte {
    type Id = AporteId;
    type SortKey = (NaiveDate, DateTime<Utc>);

    fn id(&self) -> AporteId {
        self.id
    }

    fn sort_key(&self) -> Self::SortKey {
        (self.recorded_on, self.created_at)
    }
}

pub type AporteRepository = Repository<Aporte>;

impl Repository<Aporte> {
    pub fn for_period(&self, period_id: PeriodId) -> Result<Vec<Aporte>, BudgetError> {
        self.filter(|a| a.period_id == period_id)
    }
}
