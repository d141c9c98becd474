//! Expense model
//!
//! Fixed expenses repeat across periods: permanent ones (subscriptions) are
//! copied every period, temporary ones (installment purchases) are copied
//! while installments remain. Variable expenses belong to a single period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, ExpenseId, PeriodId};
use super::money::{Money, MAX_AMOUNT};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Whether an expense repeats across periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    Variable,
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

impl FromStr for ExpenseKind {
    type Err = ExpenseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" | "fijo" => Ok(Self::Fixed),
            "variable" => Ok(Self::Variable),
            other => Err(ExpenseValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub period_id: PeriodId,
    pub category_id: CategoryId,
    pub name: String,
    pub amount: Money,
    pub kind: ExpenseKind,

    /// Fixed only: copied to every new period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_permanent: Option<bool>,

    /// Fixed temporary only: installments still to be copied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_installments: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Build a persisted expense from a create request
    pub fn from_new(period_id: PeriodId, new: &NewExpense, recorded_on: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            period_id,
            category_id: new.category_id,
            name: new.name.trim().to_string(),
            amount: new.amount,
            kind: new.kind,
            is_permanent: new.is_permanent,
            remaining_installments: new.remaining_installments,
            description: new.description.clone(),
            recorded_on,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == ExpenseKind::Fixed
    }

    pub fn is_permanent(&self) -> bool {
        self.is_fixed() && self.is_permanent == Some(true)
    }

    /// The create request that copies this expense into the next period
    ///
    /// Permanent fixed expenses are copied as-is; temporary ones are copied
    /// with one installment fewer while any remain. Variable expenses are
    /// never copied.
    pub fn carry_forward(&self) -> Option<NewExpense> {
        if !self.is_fixed() {
            return None;
        }

        let remaining_installments = if self.is_permanent() {
            None
        } else {
            match self.remaining_installments {
                Some(n) if n > 0 => Some(n - 1),
                _ => return None,
            }
        };

        Some(NewExpense {
            category_id: self.category_id,
            name: self.name.clone(),
            amount: self.amount,
            kind: ExpenseKind::Fixed,
            is_permanent: Some(self.is_permanent()),
            remaining_installments,
            description: self.description.clone(),
        })
    }

    /// Short label for lists, e.g. "fixed, 3 left"
    pub fn label(&self) -> String {
        match (self.kind, self.is_permanent, self.remaining_installments) {
            (ExpenseKind::Variable, _, _) => "variable".to_string(),
            (ExpenseKind::Fixed, Some(true), _) => "fixed, permanent".to_string(),
            (ExpenseKind::Fixed, _, Some(n)) => format!("fixed, {} left", n),
            (ExpenseKind::Fixed, _, None) => "fixed".to_string(),
        }
    }

    /// Apply an update in place
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.amount)
    }
}

/// Request to create an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub category_id: CategoryId,
    pub name: String,
    pub amount: Money,
    pub kind: ExpenseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_permanent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewExpense {
    /// A one-off variable expense
    pub fn variable(category_id: CategoryId, name: impl Into<String>, amount: Money) -> Self {
        Self {
            category_id,
            name: name.into(),
            amount,
            kind: ExpenseKind::Variable,
            is_permanent: None,
            remaining_installments: None,
            description: None,
        }
    }

    /// A fixed expense copied to every period
    pub fn permanent(category_id: CategoryId, name: impl Into<String>, amount: Money) -> Self {
        Self {
            kind: ExpenseKind::Fixed,
            is_permanent: Some(true),
            ..Self::variable(category_id, name, amount)
        }
    }

    /// A fixed expense with a number of installments left
    pub fn installments(
        category_id: CategoryId,
        name: impl Into<String>,
        amount: Money,
        remaining: u32,
    ) -> Self {
        Self {
            kind: ExpenseKind::Fixed,
            is_permanent: Some(false),
            remaining_installments: Some(remaining),
            ..Self::variable(category_id, name, amount)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_name(&self.name)?;
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())?;

        match self.kind {
            ExpenseKind::Variable => {
                if self.is_permanent.is_some() || self.remaining_installments.is_some() {
                    return Err(ExpenseValidationError::FixedOnlyField);
                }
            }
            ExpenseKind::Fixed => match (self.is_permanent, self.remaining_installments) {
                (Some(true), Some(_)) => {
                    return Err(ExpenseValidationError::PermanentWithInstallments)
                }
                (Some(false), None) => {
                    return Err(ExpenseValidationError::TemporaryWithoutInstallments)
                }
                _ => {}
            },
        }

        Ok(())
    }
}

/// Editable expense fields. Kind and installments are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        validate_description(self.description.as_deref())
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), ExpenseValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ExpenseValidationError::EmptyName);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ExpenseValidationError::NameTooLong(len));
    }
    Ok(())
}

pub(crate) fn validate_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        Err(ExpenseValidationError::NonPositiveAmount(amount))
    } else if !amount.is_within_limit() {
        Err(ExpenseValidationError::AmountTooLarge(amount))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_description(
    description: Option<&str>,
) -> Result<(), ExpenseValidationError> {
    match description.map(|d| d.chars().count()) {
        Some(len) if len > MAX_DESCRIPTION_LEN => {
            Err(ExpenseValidationError::DescriptionTooLong(len))
        }
        _ => Ok(()),
    }
}

/// Validation errors for expenses and aportes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    NameTooLong(usize),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    DescriptionTooLong(usize),
    FixedOnlyField,
    PermanentWithInstallments,
    TemporaryWithoutInstallments,
    UnknownKind(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name is required"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is above the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::FixedOnlyField => {
                write!(f, "Permanence and installments only apply to fixed expenses")
            }
            Self::PermanentWithInstallments => {
                write!(f, "Permanent expenses cannot have installments")
            }
            Self::TemporaryWithoutInstallments => {
                write!(f, "Temporary expenses need a number of installments")
            }
            Self::UnknownKind(s) => {
                write!(f, "Unknown expense kind '{}' (expected fixed or variable)", s)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
