//! Storage initialization
//!
//! First-run setup: directories and the four default categories.

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::Category;

use super::file_io::{read_json, write_json_atomic};

/// Initialize storage for a fresh installation
///
/// Existing categories are kept; only missing defaults are added.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<(), BudgetError> {
    paths.ensure_directories()?;

    let mut categories: Vec<Category> = read_json(paths.categories_file())?;
    let before = categories.len();
    for default in Category::defaults() {
        if !categories.iter().any(|c| c.slug == default.slug) {
            categories.push(default);
        }
    }

    if categories.len() != before || !paths.categories_file().exists() {
        categories.sort_by_key(|c| c.slug);
        write_json_atomic(paths.categories_file(), &categories)?;
        tracing::info!(added = categories.len() - before, "seeded default categories");
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.categories_file().exists()
}
