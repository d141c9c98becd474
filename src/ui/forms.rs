//! Staged form state
//!
//! Fields are held as entered; amounts are parsed when the form is built,
//! so a half-typed value never reaches the services.

use crate::models::{CategoryId, ExpenseKind, Money, NewAporte, NewExpense, MAX_AMOUNT};

fn parse_amount(input: &str) -> Result<Money, String> {
    let amount = Money::parse(input).map_err(|e| e.to_string())?;
    if !amount.is_positive() {
        return Err("Amount must be greater than 0".to_string());
    }
    if !amount.is_within_limit() {
        return Err(format!("Amount must be at most {}", MAX_AMOUNT));
    }
    Ok(amount)
}

/// Installments left after this period; 0 marks the last one
fn parse_installments(input: &str) -> Result<u32, String> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| "Installments must be a whole number, 0 or more".to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// State of the add-expense form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub kind: ExpenseKind,
    pub name: String,
    pub amount: String,
    /// Fixed expenses only
    pub is_permanent: bool,
    /// Fixed, non-permanent expenses only
    pub remaining_installments: String,
    pub description: String,
    pub error_message: Option<String>,
}

impl ExpenseForm {
    pub fn new(kind: ExpenseKind) -> Self {
        Self {
            kind,
            name: String::new(),
            amount: String::new(),
            is_permanent: true,
            remaining_installments: String::new(),
            description: String::new(),
            error_message: None,
        }
    }

    /// Clear every field, keeping the expense kind
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        parse_amount(&self.amount)?;
        if self.kind == ExpenseKind::Fixed && !self.is_permanent {
            parse_installments(&self.remaining_installments)?;
        }
        Ok(())
    }

    pub fn build_expense(&self, category_id: CategoryId) -> Result<NewExpense, String> {
        self.validate()?;
        let name = self.name.trim().to_string();
        let amount = parse_amount(&self.amount)?;

        let expense = match (self.kind, self.is_permanent) {
            (ExpenseKind::Variable, _) => NewExpense::variable(category_id, name, amount),
            (ExpenseKind::Fixed, true) => NewExpense::permanent(category_id, name, amount),
            (ExpenseKind::Fixed, false) => NewExpense::installments(
                category_id,
                name,
                amount,
                parse_installments(&self.remaining_installments)?,
            ),
        };

        Ok(NewExpense {
            description: non_empty(&self.description),
            ..expense
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// State of the add-contribution form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AporteForm {
    pub name: String,
    pub amount: String,
    pub is_fixed: bool,
    pub description: String,
    pub error_message: Option<String>,
}

impl Default for AporteForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AporteForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            is_fixed: true,
            description: String::new(),
            error_message: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        parse_amount(&self.amount)?;
        Ok(())
    }

    pub fn build_aporte(&self, category_id: CategoryId) -> Result<NewAporte, String> {
        self.validate()?;
        let aporte = NewAporte::new(
            category_id,
            self.name.trim(),
            parse_amount(&self.amount)?,
            self.is_fixed,
        );
        Ok(NewAporte {
            description: non_empty(&self.description),
            ..aporte
        })
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// What the quick-add form records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordType {
    #[default]
    Expense,
    Aporte,
}

/// A built quick-add record, ready for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum QuickAddRecord {
    Expense(NewExpense),
    Aporte(NewAporte),
}

/// State of the quick-add form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddForm {
    pub record_type: RecordType,
    pub expense_kind: ExpenseKind,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub amount: String,
    pub description: String,
    pub is_permanent: bool,
    pub remaining_installments: String,
    pub is_fixed_aporte: bool,
    pub error_message: Option<String>,
}

impl Default for QuickAddForm {
    fn default() -> Self {
        Self::new()
    }
}

impl QuickAddForm {
    pub fn new() -> Self {
        Self {
            record_type: RecordType::Expense,
            expense_kind: ExpenseKind::Variable,
            category_id: None,
            name: String::new(),
            amount: String::new(),
            description: String::new(),
            is_permanent: false,
            remaining_installments: "1".to_string(),
            is_fixed_aporte: false,
            error_message: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.category_id.is_none() {
            return Err("Select a category".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        parse_amount(&self.amount)?;
        Ok(())
    }

    pub fn build_record(&self) -> Result<QuickAddRecord, String> {
        self.validate()?;
        let category_id = self.category_id.ok_or("Select a category")?;

        match self.record_type {
            RecordType::Expense => {
                let form = ExpenseForm {
                    kind: self.expense_kind,
                    name: self.name.clone(),
                    amount: self.amount.clone(),
                    is_permanent: self.is_permanent,
                    remaining_installments: self.remaining_installments.clone(),
                    description: self.description.clone(),
                    error_message: None,
                };
                form.build_expense(category_id).map(QuickAddRecord::Expense)
            }
            RecordType::Aporte => {
                let form = AporteForm {
                    name: self.name.clone(),
                    amount: self.amount.clone(),
                    is_fixed: self.is_fixed_aporte,
                    description: self.description.clone(),
                    error_message: None,
                };
                form.build_aporte(category_id).map(QuickAddRecord::Aporte)
            }
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// State of the edit-salary form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalaryForm {
    pub value: String,
}

impl SalaryForm {
    /// Start from the current salary
    pub fn from_salary(salary: Money) -> Self {
        Self {
            value: salary.amount().to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.value.clear();
    }

    pub fn build_salary(&self) -> Result<Money, String> {
        let salary = Money::parse(&self.value).map_err(|e| e.to_string())?;
        if !salary.is_positive() {
            return Err("Salary must be greater than 0".to_string());
        }
        Ok(salary)
    }
}
