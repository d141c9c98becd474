//! cyclebudget - salary-cycle and credit-cycle budgeting
//!
//! Tracks a monthly salary against four fixed categories (savings, rent,
//! usable credit and liquidity), with credit card spending grouped into its
//! own billing cycle. Expenses are fixed or variable; contributions
//! ("aportes") offset a category's expenses.
//!
//! # Architecture
//!
//! - `config`: Data directory and settings
//! - `error`: Custom error types
//! - `models`: Periods, categories, expenses, aportes and summaries
//! - `storage`: The [`storage::Backend`] seam and its JSON file implementation
//! - `services`: Cached stores, the summary calculator and the dashboard
//! - `ui`: Modal, form and category-detail view state
//! - `setup`: First-run wizard
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use cyclebudget::config::{BudgetPaths, Settings};
//! use cyclebudget::services::Dashboard;
//! use cyclebudget::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings)?;
//! let mut dashboard = Dashboard::new(&storage);
//! let summary = dashboard.load()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod setup;
pub mod storage;
pub mod ui;

pub use error::{BudgetError, BudgetResult};
