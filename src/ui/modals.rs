//! Modal visibility
//!
//! At most one modal is open at a time; opening one replaces the other.

use crate::models::{AporteId, CategorySlug, ExpenseId};

/// Record awaiting delete confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDelete {
    Expense(ExpenseId),
    Aporte(AporteId),
}

/// Currently open modal (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    InitialSetup,
    CategoryDetail(CategorySlug),
    EditSalary,
    QuickAdd,
    DeleteConfirm(PendingDelete),
}

/// Open/close state for the dashboard's modals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    active: Modal,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Modal {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.active != Modal::None
    }

    pub fn open(&mut self, modal: Modal) {
        self.active = modal;
    }

    pub fn close(&mut self) {
        self.active = Modal::None;
    }

    pub fn is_initial_setup_open(&self) -> bool {
        self.active == Modal::InitialSetup
    }

    pub fn is_edit_salary_open(&self) -> bool {
        self.active == Modal::EditSalary
    }

    pub fn is_quick_add_open(&self) -> bool {
        self.active == Modal::QuickAdd
    }

    /// Category shown in the detail modal
    pub fn category_detail(&self) -> Option<CategorySlug> {
        match self.active {
            Modal::CategoryDetail(slug) => Some(slug),
            _ => None,
        }
    }

    /// Record awaiting confirmation
    pub fn pending_delete(&self) -> Option<PendingDelete> {
        match self.active {
            Modal::DeleteConfirm(pending) => Some(pending),
            _ => None,
        }
    }

    /// Close the confirmation, returning what was confirmed
    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        let pending = self.pending_delete();
        if pending.is_some() {
            self.close();
        }
        pending
    }
}
