//! Aporte service
//!
//! Same cache discipline as expenses: validate first, then replace by id.

use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Aporte, AporteId, AporteUpdate, CategoryId, NewAporte, PeriodId};
use crate::storage::{AporteFilter, Backend};

/// Service for contribution management
pub struct AporteService<'a> {
    backend: &'a dyn Backend,
    aportes: Vec<Aporte>,
}

impl<'a> AporteService<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            aportes: Vec::new(),
        }
    }

    pub fn fetch(
        &mut self,
        period_id: PeriodId,
        category_id: Option<CategoryId>,
    ) -> BudgetResult<&[Aporte]> {
        let mut filter = AporteFilter::period(period_id);
        filter.category_id = category_id;
        self.aportes = self.backend.list_aportes(&filter)?;
        debug!(period = %period_id, count = self.aportes.len(), "fetched aportes");
        Ok(&self.aportes)
    }

    /// Fetch every aporte regardless of period, replacing the cache
    pub fn fetch_all(&mut self) -> BudgetResult<&[Aporte]> {
        self.aportes = self.backend.list_aportes(&AporteFilter::default())?;
        Ok(&self.aportes)
    }

    pub fn aportes(&self) -> &[Aporte] {
        &self.aportes
    }

    pub fn find(&self, identifier: &str) -> BudgetResult<&Aporte> {
        self.aportes
            .iter()
            .find(|a| a.id.matches(identifier))
            .ok_or_else(|| BudgetError::aporte_not_found(identifier))
    }

    pub fn create(&mut self, period_id: PeriodId, new: &NewAporte) -> BudgetResult<Aporte> {
        new.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let created = self.backend.create_aporte(period_id, new)?;
        info!(aporte = %created.id, amount = %created.amount, "created aporte");
        self.aportes.push(created.clone());
        Ok(created)
    }

    pub fn update(&mut self, id: AporteId, update: &AporteUpdate) -> BudgetResult<Aporte> {
        if update.is_empty() {
            return Err(BudgetError::Validation("Nothing to update".into()));
        }
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let updated = self.backend.update_aporte(id, update)?;
        if let Some(slot) = self.aportes.iter_mut().find(|a| a.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub fn delete(&mut self, id: AporteId) -> BudgetResult<()> {
        self.backend.delete_aporte(id)?;
        if let Some(pos) = self.aportes.iter().position(|a| a.id == id) {
            self.aportes.remove(pos);
        }
        info!(aporte = %id, "deleted aporte");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySlug, Money, PeriodKind};
    use crate::services::test_support::CountingBackend;

    fn setup(backend: &CountingBackend, slug: CategorySlug) -> (PeriodId, CategoryId) {
        let period = backend.active_period(PeriodKind::Monthly).unwrap();
        let category = backend.storage().categories.get_by_slug(slug).unwrap().unwrap();
        (period.id, category.id)
    }

    #[test]
    fn test_invalid_aporte_never_reaches_backend() {
        let backend = CountingBackend::new();
        let (period_id, rent) = setup(&backend, CategorySlug::Rent);
        let mut service = AporteService::new(&backend);
        let before = backend.calls();

        assert!(service
            .create(
                period_id,
                &NewAporte::new(rent, "Partner", Money::zero(), true),
            )
            .is_err());
        assert!(service
            .create(period_id, &NewAporte::new(rent, "  ", Money::new(10), true))
            .is_err());
        assert_eq!(backend.calls(), before);
    }

    #[test]
    fn test_credit_aporte_refused_by_backend() {
        let backend = CountingBackend::new();
        let (period_id, credit) = setup(&backend, CategorySlug::Credit);
        let mut service = AporteService::new(&backend);

        let result = service.create(
            period_id,
            &NewAporte::new(credit, "Refund", Money::new(5_000), false),
        );
        assert!(result.unwrap_err().is_validation());
        assert!(service.aportes().is_empty());
    }

    #[test]
    fn test_create_update_delete() {
        let backend = CountingBackend::new();
        let (period_id, rent) = setup(&backend, CategorySlug::Rent);
        let mut service = AporteService::new(&backend);

        let a = service
            .create(
                period_id,
                &NewAporte::new(rent, "Partner", Money::new(170_000), true),
            )
            .unwrap();
        let b = service
            .create(
                period_id,
                &NewAporte::new(rent, "Sale", Money::new(20_000), false),
            )
            .unwrap();

        service
            .update(
                b.id,
                &AporteUpdate {
                    name: Some("Phone sale".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(service.find(&b.id.short()).unwrap().name, "Phone sale");

        service.delete(a.id).unwrap();
        assert_eq!(service.aportes().len(), 1);
        assert_eq!(service.aportes()[0].id, b.id);
    }
}
