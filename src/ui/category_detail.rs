//! Category detail view state

use crate::models::{
    Aporte, Category, CategorySlug, CategorySummary, Expense, ExpenseKind, Money, PeriodId,
};
use crate::services::summary::summarize_category;

use super::forms::{AporteForm, ExpenseForm};

/// Tabs of the category detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Summary,
    Fixed,
    Variable,
    Contributions,
}

impl DetailTab {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Fixed => "Fixed",
            Self::Variable => "Variable",
            Self::Contributions => "Contributions",
        }
    }
}

/// State of the category detail view for one category and period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetailState {
    pub slug: CategorySlug,
    pub period_id: PeriodId,
    goal: Option<Money>,
    active_tab: DetailTab,
    expense_form: Option<ExpenseForm>,
    aporte_form: Option<AporteForm>,
    editing_goal: bool,
    pub goal_input: String,
}

impl CategoryDetailState {
    pub fn new(slug: CategorySlug, period_id: PeriodId, goal: Option<Money>) -> Self {
        Self {
            slug,
            period_id,
            goal,
            active_tab: DetailTab::Summary,
            expense_form: None,
            aporte_form: None,
            editing_goal: false,
            goal_input: String::new(),
        }
    }

    /// Tabs shown for this category; credit has no contributions
    pub fn tabs(&self) -> Vec<DetailTab> {
        let mut tabs = vec![DetailTab::Summary, DetailTab::Fixed, DetailTab::Variable];
        if self.slug.accepts_contributions() {
            tabs.push(DetailTab::Contributions);
        }
        tabs
    }

    pub fn active_tab(&self) -> DetailTab {
        self.active_tab
    }

    /// Switch tab; returns false if the tab is not shown for this category
    pub fn set_tab(&mut self, tab: DetailTab) -> bool {
        if !self.tabs().contains(&tab) {
            return false;
        }
        self.active_tab = tab;
        true
    }

    pub fn goal(&self) -> Option<Money> {
        self.goal
    }

    pub fn expense_form(&mut self) -> Option<&mut ExpenseForm> {
        self.expense_form.as_mut()
    }

    pub fn is_expense_form_open(&self) -> bool {
        self.expense_form.is_some()
    }

    pub fn open_expense_form(&mut self, kind: ExpenseKind) {
        self.expense_form = Some(ExpenseForm::new(kind));
    }

    pub fn close_expense_form(&mut self) {
        self.expense_form = None;
    }

    pub fn aporte_form(&mut self) -> Option<&mut AporteForm> {
        self.aporte_form.as_mut()
    }

    pub fn is_aporte_form_open(&self) -> bool {
        self.aporte_form.is_some()
    }

    /// Open the contribution form; returns false for credit
    pub fn open_aporte_form(&mut self) -> bool {
        if !self.slug.accepts_contributions() {
            return false;
        }
        self.aporte_form = Some(AporteForm::new());
        true
    }

    pub fn close_aporte_form(&mut self) {
        self.aporte_form = None;
    }

    pub fn is_editing_goal(&self) -> bool {
        self.editing_goal
    }

    pub fn start_editing_goal(&mut self) {
        self.goal_input = self.goal.unwrap_or_default().amount().to_string();
        self.editing_goal = true;
    }

    pub fn cancel_editing_goal(&mut self) {
        self.editing_goal = false;
        self.goal_input = self.goal.unwrap_or_default().amount().to_string();
    }

    /// Accept the edited goal; it must be greater than zero
    pub fn save_goal(&mut self) -> Result<Money, String> {
        let goal = Money::parse(&self.goal_input).map_err(|e| e.to_string())?;
        if !goal.is_positive() {
            return Err("Goal must be greater than 0".to_string());
        }
        self.goal = Some(goal);
        self.editing_goal = false;
        Ok(goal)
    }

    /// Totals of the category from the items currently shown
    pub fn summarize(
        &self,
        category: &Category,
        expenses: &[Expense],
        aportes: &[Aporte],
    ) -> CategorySummary {
        let goal = if category.slug.has_persisted_goal() {
            self.goal
        } else {
            None
        };
        summarize_category(category, expenses, aportes, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_has_no_contributions_tab() {
        let mut state = CategoryDetailState::new(CategorySlug::Credit, PeriodId::new(), None);
        assert_eq!(state.tabs().len(), 3);
        assert!(!state.set_tab(DetailTab::Contributions));
        assert_eq!(state.active_tab(), DetailTab::Summary);
        assert!(!state.open_aporte_form());
        assert!(!state.is_aporte_form_open());

        let mut rent = CategoryDetailState::new(CategorySlug::Rent, PeriodId::new(), None);
        assert!(rent.set_tab(DetailTab::Contributions));
        assert!(rent.open_aporte_form());
        assert!(rent.aporte_form().unwrap().is_fixed);
    }

    #[test]
    fn test_form_visibility() {
        let mut state = CategoryDetailState::new(CategorySlug::Savings, PeriodId::new(), None);
        assert!(!state.is_expense_form_open());

        state.open_expense_form(ExpenseKind::Variable);
        state.expense_form().unwrap().name = "Pizza".into();
        assert!(state.is_expense_form_open());

        state.close_expense_form();
        state.open_expense_form(ExpenseKind::Fixed);
        let form = state.expense_form().unwrap();
        assert!(form.name.is_empty());
        assert_eq!(form.kind, ExpenseKind::Fixed);
    }

    #[test]
    fn test_goal_must_be_positive() {
        let mut state = CategoryDetailState::new(
            CategorySlug::Credit,
            PeriodId::new(),
            Some(Money::new(300_000)),
        );
        state.start_editing_goal();
        assert_eq!(state.goal_input, "300000");

        state.goal_input = "0".into();
        assert!(state.save_goal().is_err());
        assert!(state.is_editing_goal());
        assert_eq!(state.goal(), Some(Money::new(300_000)));

        state.goal_input = "350.000".into();
        assert_eq!(state.save_goal().unwrap(), Money::new(350_000));
        assert!(!state.is_editing_goal());
        assert_eq!(state.goal(), Some(Money::new(350_000)));
    }

    #[test]
    fn test_cancel_restores_goal_input() {
        let mut state =
            CategoryDetailState::new(CategorySlug::Credit, PeriodId::new(), Some(Money::new(5)));
        state.start_editing_goal();
        state.goal_input = "999".into();
        state.cancel_editing_goal();
        assert_eq!(state.goal_input, "5");
        assert!(!state.is_editing_goal());
    }
}
