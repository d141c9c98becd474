//! Setup wizard state
//!
//! Five linear steps: salary and previous credit debt, savings, rent, credit,
//! review. Items are staged locally and only reach the backend on apply.

use std::fmt;

use tracing::{info, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::expense::{validate_amount, validate_name};
use crate::models::{
    CategoryId, CategorySlug, Money, NewAporte, NewExpense, PeriodKind, PeriodUpdate,
};
use crate::storage::Backend;

/// Number of wizard steps
pub const TOTAL_STEPS: u8 = 5;

/// The wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basics,
    Savings,
    Rent,
    Credit,
    Review,
}

impl WizardStep {
    /// Step for a 1-based index, clamped into range
    pub fn from_index(index: u8) -> Self {
        match index.clamp(1, TOTAL_STEPS) {
            1 => Self::Basics,
            2 => Self::Savings,
            3 => Self::Rent,
            4 => Self::Credit,
            _ => Self::Review,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basics => "Salary and previous credit",
            Self::Savings => "Savings",
            Self::Rent => "Rent",
            Self::Credit => "Usable credit",
            Self::Review => "Review",
        }
    }

    /// The category whose items are staged on this step
    pub fn category(&self) -> Option<CategorySlug> {
        match self {
            Self::Savings => Some(CategorySlug::Savings),
            Self::Rent => Some(CategorySlug::Rent),
            Self::Credit => Some(CategorySlug::Credit),
            Self::Basics | Self::Review => None,
        }
    }

    pub fn accepts_expenses(&self) -> bool {
        self.category().is_some()
    }

    pub fn accepts_aportes(&self) -> bool {
        matches!(self, Self::Savings | Self::Rent)
    }
}

/// A fixed expense staged in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedExpense {
    pub name: String,
    pub amount: Money,
    pub is_permanent: bool,
    pub remaining_installments: Option<u32>,
    pub description: Option<String>,
}

impl StagedExpense {
    pub fn permanent(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
            is_permanent: true,
            remaining_installments: None,
            description: None,
        }
    }

    pub fn installments(name: impl Into<String>, amount: Money, remaining: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            is_permanent: false,
            remaining_installments: Some(remaining),
            description: None,
        }
    }

    pub fn to_new(&self, category_id: CategoryId) -> NewExpense {
        let base = if self.is_permanent {
            NewExpense::permanent(category_id, self.name.clone(), self.amount)
        } else {
            NewExpense::installments(
                category_id,
                self.name.clone(),
                self.amount,
                self.remaining_installments.unwrap_or_default(),
            )
        };
        NewExpense {
            description: self.description.clone(),
            ..base
        }
    }
}

impl fmt::Display for StagedExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_permanent, self.remaining_installments) {
            (true, _) => write!(f, "{} (permanent) {}", self.name, self.amount),
            (false, n) => write!(
                f,
                "{} ({} installments) {}",
                self.name,
                n.unwrap_or_default(),
                self.amount
            ),
        }
    }
}

/// A contribution staged in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAporte {
    pub name: String,
    pub amount: Money,
    pub is_fixed: bool,
    pub description: Option<String>,
}

impl StagedAporte {
    pub fn new(name: impl Into<String>, amount: Money, is_fixed: bool) -> Self {
        Self {
            name: name.into(),
            amount,
            is_fixed,
            description: None,
        }
    }

    pub fn to_new(&self, category_id: CategoryId) -> NewAporte {
        NewAporte {
            description: self.description.clone(),
            ..NewAporte::new(category_id, self.name.clone(), self.amount, self.is_fixed)
        }
    }
}

impl fmt::Display for StagedAporte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed {
            write!(f, "{} (fixed) {}", self.name, self.amount)
        } else {
            write!(f, "{} {}", self.name, self.amount)
        }
    }
}

/// Outcome of a successful apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    /// Backend mutations performed
    pub applied: usize,
}

/// Initial setup wizard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupWizard {
    step: u8,
    pub salary: Money,
    pub previous_debt: Money,
    pub credit_goal: Money,
    savings_expenses: Vec<StagedExpense>,
    savings_aportes: Vec<StagedAporte>,
    rent_expenses: Vec<StagedExpense>,
    rent_aportes: Vec<StagedAporte>,
    credit_expenses: Vec<StagedExpense>,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        Self {
            step: 1,
            salary: Money::zero(),
            previous_debt: Money::zero(),
            credit_goal: Money::zero(),
            savings_expenses: Vec::new(),
            savings_aportes: Vec::new(),
            rent_expenses: Vec::new(),
            rent_aportes: Vec::new(),
            credit_expenses: Vec::new(),
        }
    }

    /// Current step, 1-based
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn current(&self) -> WizardStep {
        WizardStep::from_index(self.step)
    }

    pub fn is_last(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    /// Advance one step; returns false at the last step
    pub fn next(&mut self) -> bool {
        if self.step < TOTAL_STEPS {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step; returns false at the first step
    pub fn back(&mut self) -> bool {
        if self.step > 1 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    pub fn can_proceed(&self) -> bool {
        match self.current() {
            WizardStep::Basics => self.salary.is_positive(),
            WizardStep::Savings => !self.savings_total().is_negative(),
            WizardStep::Rent => !self.rent_total().is_negative(),
            WizardStep::Credit => !self.credit_goal.is_negative(),
            WizardStep::Review => true,
        }
    }

    fn expenses_mut(&mut self, step: WizardStep) -> Option<&mut Vec<StagedExpense>> {
        match step {
            WizardStep::Savings => Some(&mut self.savings_expenses),
            WizardStep::Rent => Some(&mut self.rent_expenses),
            WizardStep::Credit => Some(&mut self.credit_expenses),
            _ => None,
        }
    }

    fn aportes_mut(&mut self, step: WizardStep) -> Option<&mut Vec<StagedAporte>> {
        match step {
            WizardStep::Savings => Some(&mut self.savings_aportes),
            WizardStep::Rent => Some(&mut self.rent_aportes),
            _ => None,
        }
    }

    pub fn expenses(&self, step: WizardStep) -> &[StagedExpense] {
        match step {
            WizardStep::Savings => &self.savings_expenses,
            WizardStep::Rent => &self.rent_expenses,
            WizardStep::Credit => &self.credit_expenses,
            _ => &[],
        }
    }

    pub fn aportes(&self, step: WizardStep) -> &[StagedAporte] {
        match step {
            WizardStep::Savings => &self.savings_aportes,
            WizardStep::Rent => &self.rent_aportes,
            _ => &[],
        }
    }

    /// Stage a fixed expense on the current step
    pub fn stage_expense(&mut self, item: StagedExpense) -> BudgetResult<()> {
        validate_name(&item.name).map_err(|e| BudgetError::Validation(e.to_string()))?;
        validate_amount(item.amount).map_err(|e| BudgetError::Validation(e.to_string()))?;

        let step = self.current();
        self.expenses_mut(step)
            .ok_or_else(|| {
                BudgetError::Setup(format!("Expenses cannot be added on the {} step", step.title()))
            })?
            .push(item);
        Ok(())
    }

    /// Stage a contribution on the current step (savings and rent only)
    pub fn stage_aporte(&mut self, item: StagedAporte) -> BudgetResult<()> {
        validate_name(&item.name).map_err(|e| BudgetError::Validation(e.to_string()))?;
        validate_amount(item.amount).map_err(|e| BudgetError::Validation(e.to_string()))?;

        let step = self.current();
        self.aportes_mut(step)
            .ok_or_else(|| {
                BudgetError::Setup(format!(
                    "Contributions cannot be added on the {} step",
                    step.title()
                ))
            })?
            .push(item);
        Ok(())
    }

    pub fn remove_expense(&mut self, index: usize) -> Option<StagedExpense> {
        let step = self.current();
        let list = self.expenses_mut(step)?;
        (index < list.len()).then(|| list.remove(index))
    }

    pub fn remove_aporte(&mut self, index: usize) -> Option<StagedAporte> {
        let step = self.current();
        let list = self.aportes_mut(step)?;
        (index < list.len()).then(|| list.remove(index))
    }

    fn staged_total(expenses: &[StagedExpense], aportes: &[StagedAporte]) -> Money {
        let spent: Money = expenses.iter().map(|e| e.amount).sum();
        let offset: Money = aportes.iter().map(|a| a.amount).sum();
        spent - offset
    }

    /// Savings total-real of the staged items
    pub fn savings_total(&self) -> Money {
        Self::staged_total(&self.savings_expenses, &self.savings_aportes)
    }

    /// Rent total-real of the staged items
    pub fn rent_total(&self) -> Money {
        Self::staged_total(&self.rent_expenses, &self.rent_aportes)
    }

    pub fn credit_available(&self) -> Money {
        self.credit_goal - Self::staged_total(&self.credit_expenses, &[])
    }

    pub fn liquidity_preview(&self) -> Money {
        crate::services::summary::liquidity(
            self.salary,
            self.savings_total(),
            self.rent_total(),
            self.previous_debt,
        )
    }

    /// Number of backend mutations apply will perform
    pub fn planned_calls(&self) -> usize {
        3 + self.savings_expenses.len()
            + self.savings_aportes.len()
            + self.rent_expenses.len()
            + self.rent_aportes.len()
            + self.credit_expenses.len()
    }

    /// Persist the wizard: period values first, then every staged item in order
    ///
    /// Calls are sequential with no rollback. On failure the error names how
    /// many calls had already been applied.
    pub fn apply(&self, backend: &dyn Backend) -> BudgetResult<ApplyReport> {
        let total = self.planned_calls();
        let mut applied = 0;

        self.apply_steps(backend, &mut applied).map_err(|err| {
            warn!(applied, total, error = %err, "setup apply stopped");
            BudgetError::Setup(format!(
                "{} ({} of {} changes were applied)",
                err, applied, total
            ))
        })?;

        info!(applied, "setup applied");
        Ok(ApplyReport { applied })
    }

    fn apply_steps(&self, backend: &dyn Backend, applied: &mut usize) -> BudgetResult<()> {
        let categories = backend.init_categories()?;
        let category_id = |slug: CategorySlug| {
            categories
                .iter()
                .find(|c| c.slug == slug)
                .map(|c| c.id)
                .ok_or_else(|| BudgetError::category_not_found(slug.as_str()))
        };
        let savings = category_id(CategorySlug::Savings)?;
        let rent = category_id(CategorySlug::Rent)?;
        let credit = category_id(CategorySlug::Credit)?;

        let monthly = backend.active_period(PeriodKind::Monthly)?;
        let cycle = backend.active_period(PeriodKind::CreditCycle)?;

        backend.update_period(monthly.id, &PeriodUpdate::salary(self.salary))?;
        *applied += 1;
        backend.update_period(cycle.id, &PeriodUpdate::credit_goal(self.credit_goal))?;
        *applied += 1;
        backend.update_period(cycle.id, &PeriodUpdate::total_spent(self.previous_debt))?;
        *applied += 1;

        let batches: [(_, _, &[StagedExpense], &[StagedAporte]); 3] = [
            (
                monthly.id,
                savings,
                self.savings_expenses.as_slice(),
                self.savings_aportes.as_slice(),
            ),
            (
                monthly.id,
                rent,
                self.rent_expenses.as_slice(),
                self.rent_aportes.as_slice(),
            ),
            (cycle.id, credit, self.credit_expenses.as_slice(), &[]),
        ];

        for (period_id, category, expenses, aportes) in batches {
            for item in expenses {
                backend.create_expense(period_id, &item.to_new(category))?;
                *applied += 1;
            }
            for item in aportes {
                backend.create_aporte(period_id, &item.to_new(category))?;
                *applied += 1;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::CountingBackend;
    use crate::storage::{AporteFilter, ExpenseFilter};

    #[test]
    fn test_step_bounds() {
        let mut wizard = SetupWizard::new();
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.back());
        assert_eq!(wizard.step(), 1);

        for _ in 0..10 {
            wizard.next();
            assert!((1..=TOTAL_STEPS).contains(&wizard.step()));
        }
        assert_eq!(wizard.step(), TOTAL_STEPS);
        assert!(!wizard.next());
        assert_eq!(wizard.current(), WizardStep::Review);

        for _ in 0..10 {
            wizard.back();
            assert!((1..=TOTAL_STEPS).contains(&wizard.step()));
        }
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_can_proceed() {
        let mut wizard = SetupWizard::new();
        assert!(!wizard.can_proceed());
        wizard.salary = Money::new(1_000_000);
        assert!(wizard.can_proceed());

        wizard.next();
        wizard
            .stage_aporte(StagedAporte::new("Bonus", Money::new(10_000), false))
            .unwrap();
        assert!(!wizard.can_proceed());
        wizard
            .stage_expense(StagedExpense::permanent("Fund", Money::new(200_000)))
            .unwrap();
        assert!(wizard.can_proceed());

        wizard.next();
        wizard.next();
        wizard.credit_goal = Money::new(-1);
        assert!(!wizard.can_proceed());

        wizard.next();
        assert!(wizard.can_proceed());
    }

    #[test]
    fn test_staging_rules() {
        let mut wizard = SetupWizard::new();
        assert!(matches!(
            wizard.stage_expense(StagedExpense::permanent("Fund", Money::new(1))),
            Err(BudgetError::Setup(_))
        ));

        wizard.next();
        assert!(wizard
            .stage_expense(StagedExpense::permanent("Fund", Money::zero()))
            .unwrap_err()
            .is_validation());

        wizard.next();
        wizard.next();
        assert_eq!(wizard.current(), WizardStep::Credit);
        assert!(matches!(
            wizard.stage_aporte(StagedAporte::new("Refund", Money::new(1), false)),
            Err(BudgetError::Setup(_))
        ));
        wizard
            .stage_expense(StagedExpense::installments("Console", Money::new(50_000), 3))
            .unwrap();
        assert_eq!(wizard.expenses(WizardStep::Credit).len(), 1);
        assert!(wizard.remove_expense(5).is_none());
        assert!(wizard.remove_expense(0).is_some());
        assert!(wizard.expenses(WizardStep::Credit).is_empty());
    }

    #[test]
    fn test_previews() {
        let mut wizard = SetupWizard::new();
        wizard.salary = Money::new(1_000_000);
        wizard.previous_debt = Money::new(120_000);
        wizard.credit_goal = Money::new(300_000);

        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Fund", Money::new(200_000)))
            .unwrap();
        wizard
            .stage_aporte(StagedAporte::new("Bonus", Money::new(50_000), false))
            .unwrap();
        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Rent", Money::new(400_000)))
            .unwrap();
        wizard
            .stage_aporte(StagedAporte::new("Partner", Money::new(170_000), true))
            .unwrap();
        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Netflix", Money::new(20_000)))
            .unwrap();

        assert_eq!(wizard.savings_total(), Money::new(150_000));
        assert_eq!(wizard.rent_total(), Money::new(230_000));
        assert_eq!(wizard.credit_available(), Money::new(280_000));
        assert_eq!(wizard.liquidity_preview(), Money::new(500_000));
        assert_eq!(wizard.planned_calls(), 8);
    }

    #[test]
    fn test_apply_creates_everything() {
        let backend = CountingBackend::new();
        let mut wizard = SetupWizard::new();
        wizard.salary = Money::new(1_000_000);
        wizard.credit_goal = Money::new(300_000);
        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Fund", Money::new(200_000)))
            .unwrap();
        wizard.next();
        wizard
            .stage_aporte(StagedAporte::new("Partner", Money::new(170_000), true))
            .unwrap();
        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Netflix", Money::new(20_000)))
            .unwrap();

        let report = wizard.apply(&backend).unwrap();
        assert_eq!(report.applied, 6);

        let monthly = backend.active_period(PeriodKind::Monthly).unwrap();
        let cycle = backend.active_period(PeriodKind::CreditCycle).unwrap();
        assert_eq!(monthly.salary, Money::new(1_000_000));
        assert_eq!(cycle.goals.credit, Money::new(300_000));
        assert_eq!(
            backend.list_expenses(&ExpenseFilter::period(monthly.id)).unwrap().len(),
            1
        );
        assert_eq!(
            backend.list_aportes(&AporteFilter::period(monthly.id)).unwrap().len(),
            1
        );
        assert_eq!(
            backend.list_expenses(&ExpenseFilter::period(cycle.id)).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_apply_reports_partial_failure() {
        let backend = CountingBackend::new();
        let mut wizard = SetupWizard::new();
        wizard.salary = Money::new(1_000_000);
        wizard.credit_goal = Money::new(300_000);
        // A negative debt passes the wizard but the backend refuses it
        wizard.previous_debt = Money::new(-5);
        wizard.next();
        wizard
            .stage_expense(StagedExpense::permanent("Fund", Money::new(200_000)))
            .unwrap();

        let err = wizard.apply(&backend).unwrap_err();
        assert!(matches!(err, BudgetError::Setup(_)));
        assert!(err.to_string().contains("2 of 4 changes were applied"));

        // The first two changes stay in place
        let monthly = backend.active_period(PeriodKind::Monthly).unwrap();
        assert_eq!(monthly.salary, Money::new(1_000_000));
        assert!(backend
            .list_expenses(&ExpenseFilter::period(monthly.id))
            .unwrap()
            .is_empty());
    }
}
