//! Service layer for cyclebudget
//!
//! The services keep client-side caches of what the backend returned,
//! validate input before any backend call, and derive summaries.

pub mod aporte;
pub mod category;
pub mod dashboard;
pub mod expense;
pub mod period;
pub mod summary;

pub use aporte::AporteService;
pub use category::CategoryService;
pub use dashboard::{CategoryItems, Dashboard};
pub use expense::ExpenseService;
pub use period::PeriodService;
