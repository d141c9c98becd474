//! Summary calculator
//!
//! Pure functions from already-fetched entities to category and period
//! summaries. Negative totals are legal and never clamped.

use crate::models::{
    Aporte, Category, CategorySlug, CategorySummary, Expense, ExpenseKind, Money, Period,
    PeriodKind, PeriodStatus, PeriodSummary,
};

/// `round(100 * value / base)`, rounding half toward +∞; 0 when `base <= 0`
pub fn percent_of(value: Money, base: Money) -> i64 {
    if !base.is_positive() {
        return 0;
    }
    let (v, b) = (i128::from(value.amount()), i128::from(base.amount()));
    let rounded = (200 * v + b).div_euclid(2 * b);
    i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN })
}

/// Summarize one category over the given expenses and contributions
///
/// The lists may span several categories; only records of `category` count.
/// `persisted_goal` is the stored goal (credit only); `available` and
/// `percent_used` are measured against it, 0 when absent.
pub fn summarize_category(
    category: &Category,
    expenses: &[Expense],
    aportes: &[Aporte],
    persisted_goal: Option<Money>,
) -> CategorySummary {
    let mut total_fixed = Money::zero();
    let mut total_variable = Money::zero();
    for expense in expenses.iter().filter(|e| e.category_id == category.id) {
        match expense.kind {
            ExpenseKind::Fixed => total_fixed += expense.amount,
            ExpenseKind::Variable => total_variable += expense.amount,
        }
    }
    let total_expenses = total_fixed + total_variable;

    let total_contributions = if category.slug.accepts_contributions() {
        aportes
            .iter()
            .filter(|a| a.category_id == category.id)
            .map(|a| a.amount)
            .sum()
    } else {
        Money::zero()
    };

    let total_real = total_expenses - total_contributions;
    let goal_base = persisted_goal.unwrap_or_default();

    let goal = match category.slug {
        CategorySlug::Credit => Some(goal_base),
        CategorySlug::Savings | CategorySlug::Rent => Some(total_real),
        CategorySlug::Liquidity => None,
    };

    CategorySummary {
        category_id: category.id,
        slug: category.slug,
        name: category.name.clone(),
        total_fixed,
        total_variable,
        total_expenses,
        total_contributions,
        total_real,
        goal,
        available: goal_base - total_real,
        percent_used: percent_of(total_real, goal_base),
    }
}

/// Money left after savings, rent and last cycle's credit card bill
pub fn liquidity(
    salary: Money,
    savings_total_real: Money,
    rent_total_real: Money,
    previous_credit_debt: Money,
) -> Money {
    salary - savings_total_real - rent_total_real - previous_credit_debt
}

/// Debt carried into `monthly` from the credit card
///
/// The total of the most recently ended closed credit cycle; failing that,
/// the cycle (any status) ending inside the monthly period; otherwise 0.
pub fn previous_credit_debt(periods: &[Period], monthly: &Period) -> Money {
    let credit = || periods.iter().filter(|p| p.kind == PeriodKind::CreditCycle);

    credit()
        .filter(|p| p.status == PeriodStatus::Closed)
        .max_by_key(|p| p.end)
        .or_else(|| credit().find(|p| p.end >= monthly.start && p.end <= monthly.end))
        .map(|p| p.total_spent)
        .unwrap_or_default()
}

/// Share of the salary, as shown on the dashboard
pub fn salary_share(value: Money, salary: Money) -> i64 {
    percent_of(value, salary)
}

/// Everything a period summary is computed from
#[derive(Debug, Clone, Copy)]
pub struct SummaryInput<'a> {
    pub period: &'a Period,
    pub categories: &'a [Category],
    /// Expenses of `period`
    pub expenses: &'a [Expense],
    /// Aportes of `period`
    pub aportes: &'a [Aporte],
    /// Active credit cycle; credit is summarised against it when present
    pub credit_period: Option<&'a Period>,
    /// Expenses of `credit_period`
    pub credit_expenses: &'a [Expense],
    pub previous_credit_debt: Money,
}

/// Summarize every category of a period plus its liquidity
pub fn build_period_summary(input: &SummaryInput<'_>) -> PeriodSummary {
    let categories: Vec<CategorySummary> = input
        .categories
        .iter()
        .map(|category| {
            if category.is_credit() {
                let (period, expenses) = match input.credit_period {
                    Some(credit) => (credit, input.credit_expenses),
                    None => (input.period, input.expenses),
                };
                summarize_category(category, expenses, &[], Some(period.goals.credit))
            } else {
                summarize_category(category, input.expenses, input.aportes, None)
            }
        })
        .collect();

    let find = |slug: CategorySlug| categories.iter().find(|c| c.slug == slug);

    let liquidity = match (
        input.period.kind,
        find(CategorySlug::Savings),
        find(CategorySlug::Rent),
    ) {
        (PeriodKind::Monthly, Some(savings), Some(rent)) => liquidity(
            input.period.salary,
            savings.total_real,
            rent.total_real,
            input.previous_credit_debt,
        ),
        _ => Money::zero(),
    };

    let available_liquidity = match find(CategorySlug::Liquidity) {
        Some(liq) => liquidity - liq.total_expenses + liq.total_contributions,
        None => liquidity,
    };

    PeriodSummary {
        period: input.period.clone(),
        categories,
        liquidity,
        available_liquidity,
        previous_credit_debt: input.previous_credit_debt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewAporte, NewExpense};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn categories() -> Vec<Category> {
        Category::defaults()
    }

    fn cat(categories: &[Category], slug: CategorySlug) -> &Category {
        categories.iter().find(|c| c.slug == slug).unwrap()
    }

    fn expense(period: &Period, new: NewExpense) -> Expense {
        Expense::from_new(period.id, &new, day())
    }

    fn aporte(period: &Period, new: NewAporte) -> Aporte {
        Aporte::from_new(period.id, &new, day())
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(Money::new(150_000), Money::new(300_000)), 50);
        assert_eq!(percent_of(Money::new(1), Money::new(200)), 1);
        assert_eq!(percent_of(Money::new(1), Money::new(300)), 0);
        assert_eq!(percent_of(Money::new(-1), Money::new(200)), 0);
        assert_eq!(percent_of(Money::new(-3), Money::new(200)), -1);
        assert_eq!(percent_of(Money::new(450), Money::new(300)), 150);
    }

    #[test]
    fn test_percent_zero_when_goal_not_positive() {
        assert_eq!(percent_of(Money::new(500), Money::zero()), 0);
        assert_eq!(percent_of(Money::new(-500), Money::zero()), 0);
        assert_eq!(percent_of(Money::new(500), Money::new(-10)), 0);
    }

    #[test]
    fn test_savings_total_real_subtracts_contributions() {
        let cats = categories();
        let savings = cat(&cats, CategorySlug::Savings);
        let period = Period::containing(PeriodKind::Monthly, day(), 25);

        let expenses = vec![expense(
            &period,
            NewExpense::permanent(savings.id, "Fund", Money::new(200_000)),
        )];
        let aportes = vec![aporte(
            &period,
            NewAporte::new(savings.id, "Bonus", Money::new(50_000), false),
        )];

        let summary = summarize_category(savings, &expenses, &aportes, None);
        assert_eq!(summary.total_fixed, Money::new(200_000));
        assert_eq!(summary.total_contributions, Money::new(50_000));
        assert_eq!(summary.total_real, Money::new(150_000));
        assert_eq!(summary.goal, Some(Money::new(150_000)));
        assert_eq!(summary.available, Money::new(-150_000));
        assert_eq!(summary.percent_used, 0);
    }

    #[test]
    fn test_stored_totals_past_i64_saturate() {
        let cats = categories();
        let credit = cat(&cats, CategorySlug::Credit);
        let period = Period::containing(PeriodKind::CreditCycle, day(), 25);
        let huge = Money::new(i64::MAX / 2 + 1);

        let expenses = vec![
            expense(&period, NewExpense::variable(credit.id, "A", huge)),
            expense(&period, NewExpense::variable(credit.id, "B", huge)),
        ];

        let summary = summarize_category(credit, &expenses, &[], Some(Money::new(1)));
        assert_eq!(summary.total_real, Money::new(i64::MAX));
        assert_eq!(summary.available, Money::new(1 - i64::MAX));
    }

    #[test]
    fn test_credit_available_and_percent() {
        let cats = categories();
        let credit = cat(&cats, CategorySlug::Credit);
        let period = Period::containing(PeriodKind::CreditCycle, day(), 25);

        let expenses = vec![
            expense(&period, NewExpense::variable(credit.id, "Groceries", Money::new(100_000))),
            expense(&period, NewExpense::permanent(credit.id, "Netflix", Money::new(50_000))),
        ];
        // Contributions never count for credit
        let aportes = vec![aporte(
            &period,
            NewAporte::new(credit.id, "Refund", Money::new(10_000), false),
        )];

        let summary = summarize_category(credit, &expenses, &aportes, Some(Money::new(300_000)));
        assert_eq!(summary.total_real, Money::new(150_000));
        assert_eq!(summary.total_contributions, Money::zero());
        assert_eq!(summary.available, Money::new(150_000));
        assert_eq!(summary.percent_used, 50);
        assert_eq!(summary.goal, Some(Money::new(300_000)));
    }

    #[test]
    fn test_total_real_identity_and_overspend() {
        let cats = categories();
        let rent = cat(&cats, CategorySlug::Rent);
        let other = cat(&cats, CategorySlug::Savings);
        let period = Period::containing(PeriodKind::Monthly, day(), 25);

        let expenses = vec![
            expense(&period, NewExpense::permanent(rent.id, "Rent", Money::new(400_000))),
            expense(&period, NewExpense::variable(rent.id, "Plumber", Money::new(30_000))),
            expense(&period, NewExpense::variable(other.id, "Ignored", Money::new(99_999))),
        ];
        let aportes = vec![aporte(
            &period,
            NewAporte::new(rent.id, "Partner", Money::new(500_000), true),
        )];

        let summary = summarize_category(rent, &expenses, &aportes, None);
        assert_eq!(
            summary.total_real,
            summary.total_fixed + summary.total_variable - summary.total_contributions
        );
        assert_eq!(summary.total_real, Money::new(-70_000));
    }

    #[test]
    fn test_liquidity_formula() {
        assert_eq!(
            liquidity(
                Money::new(1_000_000),
                Money::new(150_000),
                Money::new(230_000),
                Money::new(120_000)
            ),
            Money::new(500_000)
        );
    }

    #[test]
    fn test_previous_credit_debt_prefers_latest_closed() {
        let monthly = Period::containing(PeriodKind::Monthly, day(), 25);

        let mut old = Period::containing(
            PeriodKind::CreditCycle,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            25,
        );
        old.status = PeriodStatus::Closed;
        old.total_spent = Money::new(10);
        let mut recent = Period::containing(
            PeriodKind::CreditCycle,
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            25,
        );
        recent.status = PeriodStatus::Closed;
        recent.total_spent = Money::new(20);
        let mut active = Period::containing(PeriodKind::CreditCycle, day(), 25);
        active.total_spent = Money::new(30);

        let periods = vec![old.clone(), recent, active.clone()];
        assert_eq!(previous_credit_debt(&periods, &monthly), Money::new(20));

        // No closed cycle: the cycle ending inside the month counts
        let periods = vec![active];
        assert_eq!(previous_credit_debt(&periods, &monthly), Money::new(30));

        assert_eq!(previous_credit_debt(&[], &monthly), Money::zero());
    }

    #[test]
    fn test_build_period_summary() {
        let cats = categories();
        let savings = cat(&cats, CategorySlug::Savings);
        let rent = cat(&cats, CategorySlug::Rent);
        let credit = cat(&cats, CategorySlug::Credit);
        let liq = cat(&cats, CategorySlug::Liquidity);

        let mut monthly = Period::containing(PeriodKind::Monthly, day(), 25);
        monthly.salary = Money::new(1_000_000);
        let mut cycle = Period::containing(PeriodKind::CreditCycle, day(), 25);
        cycle.goals.credit = Money::new(300_000);

        let expenses = vec![
            expense(&monthly, NewExpense::permanent(savings.id, "Fund", Money::new(200_000))),
            expense(&monthly, NewExpense::permanent(rent.id, "Rent", Money::new(400_000))),
            expense(&monthly, NewExpense::variable(liq.id, "Dinner", Money::new(30_000))),
            // Credit expenses recorded against the monthly period are ignored
            expense(&monthly, NewExpense::variable(credit.id, "Wrong", Money::new(1))),
        ];
        let aportes = vec![
            aporte(&monthly, NewAporte::new(savings.id, "Bonus", Money::new(50_000), false)),
            aporte(&monthly, NewAporte::new(rent.id, "Partner", Money::new(170_000), true)),
            aporte(&monthly, NewAporte::new(liq.id, "Sale", Money::new(10_000), false)),
        ];
        let credit_expenses = vec![expense(
            &cycle,
            NewExpense::variable(credit.id, "Groceries", Money::new(150_000)),
        )];

        let summary = build_period_summary(&SummaryInput {
            period: &monthly,
            categories: &cats,
            expenses: &expenses,
            aportes: &aportes,
            credit_period: Some(&cycle),
            credit_expenses: &credit_expenses,
            previous_credit_debt: Money::new(120_000),
        });

        assert_eq!(summary.total_real(CategorySlug::Savings), Money::new(150_000));
        assert_eq!(summary.total_real(CategorySlug::Rent), Money::new(230_000));
        let credit_summary = summary.category(CategorySlug::Credit).unwrap();
        assert_eq!(credit_summary.total_real, Money::new(150_000));
        assert_eq!(credit_summary.percent_used, 50);
        assert!(summary.category(CategorySlug::Liquidity).unwrap().goal.is_none());

        // 1.000.000 - 150.000 - 230.000 - 120.000
        assert_eq!(summary.liquidity, Money::new(500_000));
        assert_eq!(summary.available_liquidity, Money::new(480_000));
    }

    #[test]
    fn test_liquidity_zero_for_credit_periods() {
        let cats = categories();
        let mut cycle = Period::containing(PeriodKind::CreditCycle, day(), 25);
        cycle.salary = Money::new(1_000_000);

        let summary = build_period_summary(&SummaryInput {
            period: &cycle,
            categories: &cats,
            expenses: &[],
            aportes: &[],
            credit_period: None,
            credit_expenses: &[],
            previous_credit_debt: Money::zero(),
        });
        assert_eq!(summary.liquidity, Money::zero());
        assert_eq!(summary.categories.len(), 4);
    }

    #[test]
    fn test_salary_share() {
        assert_eq!(salary_share(Money::new(250_000), Money::new(1_000_000)), 25);
        assert_eq!(salary_share(Money::new(250_000), Money::zero()), 0);
    }
}
