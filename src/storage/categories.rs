//! Category repository (categories.json)

use crate::error::BudgetError;
use crate::models::{Category, CategoryId, CategorySlug};

use super::repository::{Record, Repository};

impl Record for Category {
    type Id = CategoryId;
    type SortKey = CategorySlug;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn sort_key(&self) -> CategorySlug {
        self.slug
    }
}

pub type CategoryRepository = Repository<Category>;

impl Repository<Category> {
    pub fn get_by_slug(&self, slug: CategorySlug) -> Result<Option<Category>, BudgetError> {
        self.find(|c| c.slug == slug)
    }

    /// Insert the default categories whose slug is missing; returns how many were added
    pub fn insert_missing_defaults(&self) -> Result<usize, BudgetError> {
        let mut added = 0;
        for slug in CategorySlug::all() {
            if self.get_by_slug(*slug)?.is_none() {
                self.upsert(Category::from_slug(*slug))?;
                added += 1;
            }
        }
        Ok(added)
    }
}
