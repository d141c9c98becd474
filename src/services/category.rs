//! Category service
//!
//! Caches the four categories and resolves them by slug, id or name.

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, CategorySlug, CategoryUpdate};
use crate::storage::Backend;

/// Service for category lookup and metadata edits
pub struct CategoryService<'a> {
    backend: &'a dyn Backend,
    categories: Vec<Category>,
}

impl<'a> CategoryService<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self {
            backend,
            categories: Vec::new(),
        }
    }

    /// Fetch all categories, creating the defaults when the backend has none
    pub fn fetch(&mut self) -> BudgetResult<&[Category]> {
        let mut categories = self.backend.list_categories()?;
        if categories.is_empty() {
            categories = self.backend.init_categories()?;
        }
        debug!(count = categories.len(), "fetched categories");
        self.categories = categories;
        Ok(&self.categories)
    }

    /// Create the defaults missing from the backend and refresh the cache
    pub fn init_defaults(&mut self) -> BudgetResult<&[Category]> {
        self.categories = self.backend.init_categories()?;
        Ok(&self.categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn by_slug(&self, slug: CategorySlug) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn require(&self, slug: CategorySlug) -> BudgetResult<&Category> {
        self.by_slug(slug)
            .ok_or_else(|| BudgetError::category_not_found(slug.as_str()))
    }

    /// Resolve a category by slug (or its alias), id, or display name
    pub fn find(&self, identifier: &str) -> BudgetResult<&Category> {
        if let Ok(slug) = identifier.parse::<CategorySlug>() {
            if let Some(category) = self.by_slug(slug) {
                return Ok(category);
            }
        }

        let lowered = identifier.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.id.matches(identifier) || c.name.to_lowercase() == lowered)
            .ok_or_else(|| BudgetError::category_not_found(identifier))
    }

    /// Edit display metadata; the cached entry is replaced by the response
    pub fn update(&mut self, id: CategoryId, update: &CategoryUpdate) -> BudgetResult<Category> {
        if update.is_empty() {
            return Err(BudgetError::Validation("Nothing to update".into()));
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(BudgetError::Validation("Category name cannot be empty".into()));
            }
        }

        let updated = self.backend.update_category(id, update)?;
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => self.categories.push(updated.clone()),
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::CountingBackend;

    #[test]
    fn test_fetch_initializes_defaults() {
        let backend = CountingBackend::empty();
        let mut service = CategoryService::new(&backend);

        let categories = service.fetch().unwrap();
        assert_eq!(categories.len(), 4);
        assert!(service.by_slug(CategorySlug::Liquidity).is_some());
    }

    #[test]
    fn test_find_by_slug_alias_and_name() {
        let backend = CountingBackend::new();
        let mut service = CategoryService::new(&backend);
        service.fetch().unwrap();

        assert_eq!(service.find("arriendo").unwrap().slug, CategorySlug::Rent);
        assert_eq!(service.find("usable credit").unwrap().slug, CategorySlug::Credit);
        let savings_id = service.require(CategorySlug::Savings).unwrap().id;
        assert_eq!(service.find(&savings_id.short()).unwrap().id, savings_id);
        assert!(service.find("food").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_replaces_cached_entry() {
        let backend = CountingBackend::new();
        let mut service = CategoryService::new(&backend);
        service.fetch().unwrap();
        let rent_id = service.require(CategorySlug::Rent).unwrap().id;

        service
            .update(
                rent_id,
                &CategoryUpdate {
                    name: Some("Housing".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(service.by_id(rent_id).unwrap().name, "Housing");
        assert_eq!(service.categories().len(), 4);
    }

    #[test]
    fn test_empty_update_makes_no_call() {
        let backend = CountingBackend::new();
        let mut service = CategoryService::new(&backend);
        service.fetch().unwrap();
        let id = service.require(CategorySlug::Rent).unwrap().id;
        let before = backend.calls();

        assert!(service.update(id, &CategoryUpdate::default()).is_err());
        assert_eq!(backend.calls(), before);
    }
}
