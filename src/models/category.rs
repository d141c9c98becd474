//! The four budget categories
//!
//! Categories are a fixed set identified by a semantic slug. Only the display
//! metadata (name, icon, color, description) is user-editable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Semantic identity of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySlug {
    Savings,
    Rent,
    Credit,
    Liquidity,
}

impl CategorySlug {
    /// All slugs in display order
    pub fn all() -> &'static [Self] {
        &[Self::Savings, Self::Rent, Self::Credit, Self::Liquidity]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Savings => "savings",
            Self::Rent => "rent",
            Self::Credit => "credit",
            Self::Liquidity => "liquidity",
        }
    }

    /// Default display name
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Rent => "Rent",
            Self::Credit => "Usable Credit",
            Self::Liquidity => "Liquidity",
        }
    }

    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Savings => "💵",
            Self::Rent => "🏠",
            Self::Credit => "💳",
            Self::Liquidity => "💸",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Savings => "#10b981",
            Self::Rent => "#f59e0b",
            Self::Credit => "#3b82f6",
            Self::Liquidity => "#8b5cf6",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Savings => "Money set aside every month",
            Self::Rent => "Housing and related expenses",
            Self::Credit => "Self-imposed limit for credit card spending",
            Self::Liquidity => "Cash left to spend, derived from the other categories",
        }
    }

    /// Whether the category shows a goal in summaries
    ///
    /// Savings and rent show their computed total as goal; credit has a
    /// persisted goal; liquidity has none.
    pub fn has_goal(&self) -> bool {
        !matches!(self, Self::Liquidity)
    }

    /// Credit carries the only persisted goal
    pub fn has_persisted_goal(&self) -> bool {
        matches!(self, Self::Credit)
    }

    /// Contributions are not modeled for credit
    pub fn accepts_contributions(&self) -> bool {
        !matches!(self, Self::Credit)
    }
}

impl fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategorySlug {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "ahorro" => Ok(Self::Savings),
            "rent" | "arriendo" => Ok(Self::Rent),
            "credit" | "credito" => Ok(Self::Credit),
            "liquidity" | "liquidez" => Ok(Self::Liquidity),
            other => Err(CategoryValidationError::UnknownSlug(other.to_string())),
        }
    }
}

/// A budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub has_goal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a category with the default metadata of its slug
    pub fn from_slug(slug: CategorySlug) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            slug,
            name: slug.default_name().to_string(),
            icon: slug.default_icon().to_string(),
            color: slug.default_color().to_string(),
            has_goal: slug.has_goal(),
            description: Some(slug.default_description().to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// The four default categories, in display order
    pub fn defaults() -> Vec<Self> {
        CategorySlug::all().iter().map(|s| Self::from_slug(*s)).collect()
    }

    pub fn is_credit(&self) -> bool {
        self.slug == CategorySlug::Credit
    }

    /// Apply an update in place
    pub fn apply(&mut self, update: &CategoryUpdate) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(icon) = &update.icon {
            self.icon = icon.clone();
        }
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// Editable category fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.description.is_none()
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    UnknownSlug(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::UnknownSlug(s) => write!(
                f,
                "Unknown category '{}' (expected savings, rent, credit or liquidity)",
                s
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
