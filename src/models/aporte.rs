//! Aporte (contribution) model
//!
//! A contribution offsets the expenses of its category: a partner paying
//! part of the rent, the sale of a used phone. Fixed contributions are
//! copied into every new period.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::{validate_amount, validate_description, validate_name, ExpenseValidationError};
use super::ids::{AporteId, CategoryId, PeriodId};
use super::money::Money;

/// A recorded contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aporte {
    pub id: AporteId,
    pub period_id: PeriodId,
    pub category_id: CategoryId,
    pub name: String,
    pub amount: Money,
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Aporte {
    pub fn from_new(period_id: PeriodId, new: &NewAporte, recorded_on: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: AporteId::new(),
            period_id,
            category_id: new.category_id,
            name: new.name.trim().to_string(),
            amount: new.amount,
            is_fixed: new.is_fixed,
            description: new.description.clone(),
            recorded_on,
            created_at: now,
            updated_at: now,
        }
    }

    /// The create request that copies this contribution into the next period
    pub fn carry_forward(&self) -> Option<NewAporte> {
        self.is_fixed.then(|| NewAporte {
            category_id: self.category_id,
            name: self.name.clone(),
            amount: self.amount,
            is_fixed: true,
            description: self.description.clone(),
        })
    }

    pub fn label(&self) -> &'static str {
        if self.is_fixed {
            "fixed"
        } else {
            "one-off"
        }
    }

    pub fn apply(&mut self, update: &AporteUpdate) {
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

impl fmt::Display for Aporte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.amount)
    }
}

/// Request to create a contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAporte {
    pub category_id: CategoryId,
    pub name: String,
    pub amount: Money,
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewAporte {
    pub fn new(
        category_id: CategoryId,
        name: impl Into<String>,
        amount: Money,
        is_fixed: bool,
    ) -> Self {
        Self {
            category_id,
            name: name.into(),
            amount,
            is_fixed,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_name(&self.name)?;
        validate_amount(self.amount)?;
        validate_description(self.description.as_deref())
    }
}

/// Editable contribution fields. The fixed flag is set at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AporteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AporteUpdate {
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
