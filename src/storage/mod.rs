//! Storage layer for cyclebudget
//!
//! JSON file storage with atomic writes, one file per collection, and the
//! [`Backend`] implementation built on it.

pub mod aportes;
pub mod backend;
pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
mod local;
pub mod periods;
pub mod repository;

pub use aportes::AporteRepository;
pub use backend::{AporteFilter, Backend, ExpenseFilter, PeriodFilter};
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use periods::PeriodRepository;
pub use repository::{Record, Repository};

use chrono::{Local, NaiveDate};

use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    credit_cycle_start_day: u32,
    today: Option<NaiveDate>,
    pub categories: CategoryRepository,
    pub periods: PeriodRepository,
    pub expenses: ExpenseRepository,
    pub aportes: AporteRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths, settings: &Settings) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            credit_cycle_start_day: settings.credit_cycle_start_day,
            today: None,
            categories: CategoryRepository::new(paths.categories_file()),
            periods: PeriodRepository::new(paths.periods_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            aportes: AporteRepository::new(paths.aportes_file()),
            paths,
        })
    }

    /// Create a Storage and load every collection
    pub fn open(paths: BudgetPaths, settings: &Settings) -> Result<Self, BudgetError> {
        let storage = Self::new(paths, settings)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Pin the date used for new periods and new records
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn credit_cycle_start_day(&self) -> u32 {
        self.credit_cycle_start_day
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BudgetError> {
        self.categories.load()?;
        self.periods.load()?;
        self.expenses.load()?;
        self.aportes.load()?;
        tracing::debug!(
            categories = self.categories.count()?,
            periods = self.periods.count()?,
            expenses = self.expenses.count()?,
            aportes = self.aportes.count()?,
            "loaded storage"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.categories.save()?;
        self.periods.save()?;
        self.expenses.save()?;
        self.aportes.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
