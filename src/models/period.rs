//! Budget periods
//!
//! Two kinds of period run side by side: the monthly salary cycle (1st to the
//! last day of the month) and the credit card cycle (day D of one month to
//! day D-1 of the next). At most one period of each kind is active.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::PeriodId;
use super::money::{Money, MAX_AMOUNT};

/// Which cycle a period follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Salary month: 1st to last day
    Monthly,
    /// Credit card cycle: start day to the day before it, next month
    CreditCycle,
}

impl PeriodKind {
    pub fn all() -> &'static [Self] {
        &[Self::Monthly, Self::CreditCycle]
    }

    /// The period bounds (inclusive) containing `date`
    pub fn bounds_for(&self, date: NaiveDate, credit_start_day: u32) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Monthly => monthly_bounds(date),
            Self::CreditCycle => credit_cycle_bounds(date, credit_start_day),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::CreditCycle => write!(f, "credit"),
        }
    }
}

impl FromStr for PeriodKind {
    type Err = PeriodValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "mensual" => Ok(Self::Monthly),
            "credit" | "credit-cycle" | "credit_cycle" | "credito" => Ok(Self::CreditCycle),
            other => Err(PeriodValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Lifecycle state of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    Active,
    Closed,
    /// Future period used for simulations
    Projected,
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
            Self::Projected => write!(f, "projected"),
        }
    }
}

impl FromStr for PeriodStatus {
    type Err = PeriodValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "closed" => Ok(Self::Closed),
            "projected" => Ok(Self::Projected),
            other => Err(PeriodValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Persisted goals of a period. Savings and rent have no stored goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGoals {
    #[serde(default)]
    pub credit: Money,
}

/// A budgeting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    pub kind: PeriodKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub salary: Money,
    #[serde(default)]
    pub goals: CategoryGoals,
    pub status: PeriodStatus,
    /// Cumulative spend; for credit cycles this becomes next month's debt
    #[serde(default)]
    pub total_spent: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Period {
    /// Create an active period with zero salary, goals and spend
    pub fn new(kind: PeriodKind, start: NaiveDate, end: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: PeriodId::new(),
            kind,
            start,
            end,
            salary: Money::zero(),
            goals: CategoryGoals::default(),
            status: PeriodStatus::Active,
            total_spent: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create the period of `kind` containing `date`
    pub fn containing(kind: PeriodKind, date: NaiveDate, credit_start_day: u32) -> Self {
        let (start, end) = kind.bounds_for(date, credit_start_day);
        Self::new(kind, start, end)
    }

    /// Build a period from a create request
    pub fn from_new(new: &NewPeriod) -> Self {
        let mut period = Self::new(new.kind, new.start, new.end);
        period.salary = new.salary;
        period.goals = new.goals;
        period.status = new.status;
        period
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_active(&self) -> bool {
        self.status == PeriodStatus::Active
    }

    pub fn is_closed(&self) -> bool {
        self.status == PeriodStatus::Closed
    }

    /// Apply an update in place
    pub fn apply(&mut self, update: &PeriodUpdate) {
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
        if let Some(goal) = update.credit_goal {
            self.goals.credit = goal;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(total) = update.total_spent {
            self.total_spent = total;
        }
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), PeriodValidationError> {
        if self.end < self.start {
            return Err(PeriodValidationError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        check_amounts(self.salary, self.goals.credit, self.total_spent)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{}",
            self.kind,
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Request to create a period explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPeriod {
    pub kind: PeriodKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub salary: Money,
    #[serde(default)]
    pub goals: CategoryGoals,
    pub status: PeriodStatus,
}

/// Editable period fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_goal: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PeriodStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<Money>,
}

impl PeriodUpdate {
    pub fn salary(amount: Money) -> Self {
        Self {
            salary: Some(amount),
            ..Default::default()
        }
    }

    pub fn credit_goal(amount: Money) -> Self {
        Self {
            credit_goal: Some(amount),
            ..Default::default()
        }
    }

    pub fn total_spent(amount: Money) -> Self {
        Self {
            total_spent: Some(amount),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), PeriodValidationError> {
        check_amounts(
            self.salary.unwrap_or_default(),
            self.credit_goal.unwrap_or_default(),
            self.total_spent.unwrap_or_default(),
        )
    }
}

fn check_amounts(
    salary: Money,
    goal: Money,
    total_spent: Money,
) -> Result<(), PeriodValidationError> {
    if salary.is_negative() {
        return Err(PeriodValidationError::NegativeSalary);
    }
    if goal.is_negative() {
        return Err(PeriodValidationError::NegativeGoal);
    }
    if total_spent.is_negative() {
        return Err(PeriodValidationError::NegativeTotalSpent);
    }
    if let Some(amount) = [salary, goal, total_spent]
        .into_iter()
        .find(|m| !m.is_within_limit())
    {
        return Err(PeriodValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

fn shift_month(year: i32, month: u32, forward: bool) -> (i32, u32) {
    match (month, forward) {
        (12, true) => (year + 1, 1),
        (1, false) => (year - 1, 12),
        (m, true) => (year, m + 1),
        (m, false) => (year, m - 1),
    }
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, true);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// 1st to last day of the month containing `date`
pub fn monthly_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (year, month) = (date.year(), date.month());
    (ymd(year, month, 1), ymd(year, month, last_day_of_month(year, month)))
}

/// Credit cycle containing `date`, starting on `start_day`
pub fn credit_cycle_bounds(date: NaiveDate, start_day: u32) -> (NaiveDate, NaiveDate) {
    let (year, month) = (date.year(), date.month());
    let end_day = start_day.saturating_sub(1);

    if date.day() >= start_day {
        let (next_year, next_month) = shift_month(year, month, true);
        (ymd(year, month, start_day), ymd(next_year, next_month, end_day))
    } else {
        let (prev_year, prev_month) = shift_month(year, month, false);
        (ymd(prev_year, prev_month, start_day), ymd(year, month, end_day))
    }
}

/// Validation errors for periods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodValidationError {
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    NegativeSalary,
    NegativeGoal,
    NegativeTotalSpent,
    AmountTooLarge(Money),
    UnknownKind(String),
    UnknownStatus(String),
}

impl fmt::Display for PeriodValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndBeforeStart { start, end } => {
                write!(f, "Period end {} is before its start {}", end, start)
            }
            Self::NegativeSalary => write!(f, "Salary cannot be negative"),
            Self::NegativeGoal => write!(f, "Credit goal cannot be negative"),
            Self::NegativeTotalSpent => write!(f, "Total spent cannot be negative"),
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is above the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::UnknownKind(s) => {
                write!(f, "Unknown period kind '{}' (expected monthly or credit)", s)
            }
            Self::UnknownStatus(s) => write!(
                f,
                "Unknown period status '{}' (expected active, closed or projected)",
                s
            ),
        }
    }
}

impl std::error::Error for PeriodValidationError {}
