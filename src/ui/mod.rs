//! View state for the dashboard
//!
//! Plain data: which modal is open, what has been typed into each form and
//! the category detail tabs. Nothing here talks to the backend.

pub mod category_detail;
pub mod forms;
pub mod modals;

pub use category_detail::{CategoryDetailState, DetailTab};
pub use forms::{AporteForm, ExpenseForm, QuickAddForm, QuickAddRecord, RecordType, SalaryForm};
pub use modals::{Modal, ModalState, PendingDelete};
