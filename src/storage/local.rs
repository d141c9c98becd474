//! [`Backend`] implementation over the JSON repositories
//!
//! Besides plain persistence this carries the server-side rules: the active
//! period of a kind is created on demand and inherits salary, goals and fixed
//! items from the last closed period of that kind; a credit cycle's
//! `total_spent` tracks the sum of its expenses.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Aporte, AporteId, AporteUpdate, Category, CategoryId, CategoryUpdate, Expense, ExpenseId,
    ExpenseUpdate, NewAporte, NewExpense, NewPeriod, Period, PeriodId, PeriodKind, PeriodStatus,
    PeriodUpdate,
};

use super::backend::{AporteFilter, Backend, ExpenseFilter, PeriodFilter};
use super::Storage;

impl Storage {
    fn require_period(&self, id: PeriodId) -> BudgetResult<Period> {
        self.periods
            .get(id)?
            .ok_or_else(|| BudgetError::period_not_found(id.to_string()))
    }

    fn require_category(&self, id: CategoryId) -> BudgetResult<Category> {
        self.categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }

    fn ensure_no_other_active(
        &self,
        kind: PeriodKind,
        except: Option<PeriodId>,
    ) -> BudgetResult<()> {
        match self.periods.active(kind)? {
            Some(active) if Some(active.id) != except => Err(BudgetError::Period(format!(
                "An active {} period already exists ({})",
                kind, active
            ))),
            _ => Ok(()),
        }
    }

    /// Create the current period of `kind`, rolling forward from the last closed one
    fn open_current_period(&self, kind: PeriodKind) -> BudgetResult<Period> {
        let mut period = Period::containing(kind, self.today(), self.credit_cycle_start_day());
        let previous = self.periods.latest_closed(kind)?;

        if let Some(prev) = &previous {
            period.salary = prev.salary;
            period.goals = prev.goals;
        }

        self.periods.upsert(period.clone())?;
        self.periods.save()?;
        info!(period = %period, "opened period");

        if let Some(prev) = previous {
            self.roll_forward(&prev, &period)?;
            if kind == PeriodKind::CreditCycle {
                period = self.refresh_total_spent(period.id)?;
            }
        }

        Ok(period)
    }

    /// Copy fixed expenses and fixed aportes from one period into another
    ///
    /// Returns the number of expenses and aportes copied.
    pub fn roll_forward(&self, from: &Period, to: &Period) -> BudgetResult<(usize, usize)> {
        let today = self.today();

        let mut expenses = 0;
        for expense in self.expenses.for_period(from.id)? {
            if let Some(copy) = expense.carry_forward() {
                self.expenses.upsert(Expense::from_new(to.id, &copy, today))?;
                expenses += 1;
            }
        }

        let mut aportes = 0;
        for aporte in self.aportes.for_period(from.id)? {
            if let Some(copy) = aporte.carry_forward() {
                self.aportes.upsert(Aporte::from_new(to.id, &copy, today))?;
                aportes += 1;
            }
        }

        self.expenses.save()?;
        self.aportes.save()?;
        info!(from = %from, to = %to, expenses, aportes, "rolled fixed items forward");

        Ok((expenses, aportes))
    }

    /// Recompute a credit cycle's total_spent from its expenses
    fn refresh_total_spent(&self, period_id: PeriodId) -> BudgetResult<Period> {
        let mut period = self.require_period(period_id)?;
        if period.kind != PeriodKind::CreditCycle {
            return Ok(period);
        }

        let total = self.expenses.total_for_period(period_id)?;
        if total != period.total_spent {
            period.apply(&PeriodUpdate::total_spent(total));
            self.periods.upsert(period.clone())?;
            self.periods.save()?;
            debug!(period = %period, total = %total, "updated credit total");
        }
        Ok(period)
    }
}

impl Backend for Storage {
    fn list_categories(&self) -> BudgetResult<Vec<Category>> {
        self.categories.get_all()
    }

    fn init_categories(&self) -> BudgetResult<Vec<Category>> {
        let added = self.categories.insert_missing_defaults()?;
        if added > 0 {
            self.categories.save()?;
            info!(added, "initialized default categories");
        }
        self.categories.get_all()
    }

    fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> BudgetResult<Category> {
        let mut category = self.require_category(id)?;
        category.apply(update);
        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.categories.upsert(category.clone())?;
        self.categories.save()?;
        Ok(category)
    }

    fn list_periods(&self, filter: &PeriodFilter) -> BudgetResult<Vec<Period>> {
        self.periods.filter(|p| filter.matches(p))
    }

    fn get_period(&self, id: PeriodId) -> BudgetResult<Period> {
        self.require_period(id)
    }

    fn active_period(&self, kind: PeriodKind) -> BudgetResult<Period> {
        match self.periods.active(kind)? {
            Some(period) => Ok(period),
            None => self.open_current_period(kind),
        }
    }

    fn create_period(&self, new: &NewPeriod) -> BudgetResult<Period> {
        let period = Period::from_new(new);
        period
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if period.status == PeriodStatus::Active {
            self.ensure_no_other_active(period.kind, None)?;
        }

        self.periods.upsert(period.clone())?;
        self.periods.save()?;
        info!(period = %period, "created period");
        Ok(period)
    }

    fn update_period(&self, id: PeriodId, update: &PeriodUpdate) -> BudgetResult<Period> {
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let mut period = self.require_period(id)?;
        if update.status == Some(PeriodStatus::Active) {
            self.ensure_no_other_active(period.kind, Some(id))?;
        }

        period.apply(update);
        self.periods.upsert(period.clone())?;
        self.periods.save()?;
        Ok(period)
    }

    fn close_period(&self, id: PeriodId, end: Option<NaiveDate>) -> BudgetResult<Period> {
        let mut period = self.require_period(id)?;
        if period.is_closed() {
            return Err(BudgetError::Period(format!("{} is already closed", period)));
        }

        if let Some(end) = end {
            if end < period.start {
                return Err(BudgetError::Validation(format!(
                    "End date {} is before the period start {}",
                    end, period.start
                )));
            }
            period.end = end;
        }

        period.apply(&PeriodUpdate {
            status: Some(PeriodStatus::Closed),
            ..Default::default()
        });
        self.periods.upsert(period.clone())?;
        self.periods.save()?;
        info!(period = %period, "closed period");
        Ok(period)
    }

    fn list_expenses(&self, filter: &ExpenseFilter) -> BudgetResult<Vec<Expense>> {
        self.expenses.filter(|e| filter.matches(e))
    }

    fn create_expense(&self, period_id: PeriodId, new: &NewExpense) -> BudgetResult<Expense> {
        new.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_period(period_id)?;
        self.require_category(new.category_id)?;

        let expense = Expense::from_new(period_id, new, self.today());
        self.expenses.upsert(expense.clone())?;
        self.expenses.save()?;
        self.refresh_total_spent(period_id)?;
        Ok(expense)
    }

    fn update_expense(&self, id: ExpenseId, update: &ExpenseUpdate) -> BudgetResult<Expense> {
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let mut expense = self
            .expenses
            .get(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))?;
        expense.apply(update);

        self.expenses.upsert(expense.clone())?;
        self.expenses.save()?;
        self.refresh_total_spent(expense.period_id)?;
        Ok(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> BudgetResult<()> {
        let expense = self
            .expenses
            .delete(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))?;
        self.expenses.save()?;
        self.refresh_total_spent(expense.period_id)?;
        Ok(())
    }

    fn list_aportes(&self, filter: &AporteFilter) -> BudgetResult<Vec<Aporte>> {
        self.aportes.filter(|a| filter.matches(a))
    }

    fn create_aporte(&self, period_id: PeriodId, new: &NewAporte) -> BudgetResult<Aporte> {
        new.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.require_period(period_id)?;

        let category = self.require_category(new.category_id)?;
        if !category.slug.accepts_contributions() {
            return Err(BudgetError::Validation(format!(
                "The {} category does not take contributions",
                category.name
            )));
        }

        let aporte = Aporte::from_new(period_id, new, self.today());
        self.aportes.upsert(aporte.clone())?;
        self.aportes.save()?;
        Ok(aporte)
    }

    fn update_aporte(&self, id: AporteId, update: &AporteUpdate) -> BudgetResult<Aporte> {
        update
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let mut aporte = self
            .aportes
            .get(id)?
            .ok_or_else(|| BudgetError::aporte_not_found(id.to_string()))?;
        aporte.apply(update);

        self.aportes.upsert(aporte.clone())?;
        self.aportes.save()?;
        Ok(aporte)
    }

    fn delete_aporte(&self, id: AporteId) -> BudgetResult<()> {
        self.aportes
            .delete(id)?
            .ok_or_else(|| BudgetError::aporte_not_found(id.to_string()))?;
        self.aportes.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BudgetPaths, Settings};
    use crate::models::{CategorySlug, Money};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_storage(today: NaiveDate) -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default())
            .unwrap()
            .with_today(today);
        storage.init_categories().unwrap();
        (temp_dir, storage)
    }

    fn category(storage: &Storage, slug: CategorySlug) -> Category {
        storage.categories.get_by_slug(slug).unwrap().unwrap()
    }

    #[test]
    fn test_active_period_created_on_demand() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));

        let monthly = storage.active_period(PeriodKind::Monthly).unwrap();
        assert_eq!((monthly.start, monthly.end), (date(2025, 3, 1), date(2025, 3, 31)));

        let credit = storage.active_period(PeriodKind::CreditCycle).unwrap();
        assert_eq!((credit.start, credit.end), (date(2025, 2, 25), date(2025, 3, 24)));

        // Second call returns the same period
        assert_eq!(storage.active_period(PeriodKind::Monthly).unwrap().id, monthly.id);
        assert_eq!(storage.periods.count().unwrap(), 2);
    }

    #[test]
    fn test_roll_forward_copies_fixed_items() {
        let (temp, storage) = create_test_storage(date(2025, 2, 10));
        let savings = category(&storage, CategorySlug::Savings);
        let rent = category(&storage, CategorySlug::Rent);

        let february = storage.active_period(PeriodKind::Monthly).unwrap();
        storage
            .update_period(february.id, &PeriodUpdate::salary(Money::new(1_000_000)))
            .unwrap();
        storage
            .create_expense(
                february.id,
                &NewExpense::permanent(savings.id, "Fund", Money::new(200_000)),
            )
            .unwrap();
        storage
            .create_expense(
                february.id,
                &NewExpense::installments(savings.id, "Console", Money::new(50_000), 2),
            )
            .unwrap();
        storage
            .create_expense(
                february.id,
                &NewExpense::installments(savings.id, "Phone", Money::new(30_000), 0),
            )
            .unwrap();
        storage
            .create_expense(
                february.id,
                &NewExpense::variable(rent.id, "Plumber", Money::new(40_000)),
            )
            .unwrap();
        storage
            .create_aporte(
                february.id,
                &NewAporte::new(rent.id, "Partner", Money::new(170_000), true),
            )
            .unwrap();
        storage
            .create_aporte(
                february.id,
                &NewAporte::new(rent.id, "Sale", Money::new(10_000), false),
            )
            .unwrap();
        storage.close_period(february.id, None).unwrap();

        // A month later
        let paths = BudgetPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default())
            .unwrap()
            .with_today(date(2025, 3, 5));
        let march = storage.active_period(PeriodKind::Monthly).unwrap();
        assert_ne!(march.id, february.id);
        assert_eq!(march.salary, Money::new(1_000_000));

        let expenses = storage.list_expenses(&ExpenseFilter::period(march.id)).unwrap();
        let mut names: Vec<_> = expenses.iter().map(|e| e.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Console", "Fund"]);
        let console = expenses.iter().find(|e| e.name == "Console").unwrap();
        assert_eq!(console.remaining_installments, Some(1));

        let aportes = storage.list_aportes(&AporteFilter::period(march.id)).unwrap();
        assert_eq!(aportes.len(), 1);
        assert_eq!(aportes[0].name, "Partner");
    }

    #[test]
    fn test_credit_total_spent_tracks_expenses() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        let credit = category(&storage, CategorySlug::Credit);
        let cycle = storage.active_period(PeriodKind::CreditCycle).unwrap();

        let a = storage
            .create_expense(
                cycle.id,
                &NewExpense::variable(credit.id, "Groceries", Money::new(100_000)),
            )
            .unwrap();
        storage
            .create_expense(
                cycle.id,
                &NewExpense::variable(credit.id, "Fuel", Money::new(50_000)),
            )
            .unwrap();
        assert_eq!(storage.get_period(cycle.id).unwrap().total_spent, Money::new(150_000));

        storage
            .update_expense(
                a.id,
                &ExpenseUpdate {
                    amount: Some(Money::new(120_000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(storage.get_period(cycle.id).unwrap().total_spent, Money::new(170_000));

        storage.delete_expense(a.id).unwrap();
        assert_eq!(storage.get_period(cycle.id).unwrap().total_spent, Money::new(50_000));
    }

    #[test]
    fn test_credit_category_rejects_aportes() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        let credit = category(&storage, CategorySlug::Credit);
        let cycle = storage.active_period(PeriodKind::CreditCycle).unwrap();

        let result = storage.create_aporte(
            cycle.id,
            &NewAporte::new(credit.id, "Refund", Money::new(10_000), false),
        );
        assert!(matches!(result, Err(BudgetError::Validation(_))));
    }

    #[test]
    fn test_close_period() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        let monthly = storage.active_period(PeriodKind::Monthly).unwrap();

        assert!(storage.close_period(monthly.id, Some(date(2025, 2, 1))).is_err());

        let closed = storage.close_period(monthly.id, Some(date(2025, 3, 20))).unwrap();
        assert!(closed.is_closed());
        assert_eq!(closed.end, date(2025, 3, 20));

        assert!(matches!(
            storage.close_period(monthly.id, None),
            Err(BudgetError::Period(_))
        ));
    }

    #[test]
    fn test_single_active_period_per_kind() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        storage.active_period(PeriodKind::Monthly).unwrap();

        let result = storage.create_period(&NewPeriod {
            kind: PeriodKind::Monthly,
            start: date(2025, 4, 1),
            end: date(2025, 4, 30),
            salary: Money::zero(),
            goals: Default::default(),
            status: PeriodStatus::Active,
        });
        assert!(matches!(result, Err(BudgetError::Period(_))));

        let projected = storage
            .create_period(&NewPeriod {
                kind: PeriodKind::Monthly,
                start: date(2025, 4, 1),
                end: date(2025, 4, 30),
                salary: Money::new(1_000_000),
                goals: Default::default(),
                status: PeriodStatus::Projected,
            })
            .unwrap();
        assert_eq!(projected.status, PeriodStatus::Projected);
    }

    #[test]
    fn test_missing_entities() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        let savings = category(&storage, CategorySlug::Savings);

        let result = storage.create_expense(
            PeriodId::new(),
            &NewExpense::variable(savings.id, "Lost", Money::new(1)),
        );
        assert!(result.unwrap_err().is_not_found());
        assert!(storage.delete_expense(ExpenseId::new()).unwrap_err().is_not_found());
        assert!(storage.delete_aporte(AporteId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_category() {
        let (_temp, storage) = create_test_storage(date(2025, 3, 10));
        let rent = category(&storage, CategorySlug::Rent);

        let updated = storage
            .update_category(
                rent.id,
                &CategoryUpdate {
                    icon: Some("🏡".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.icon, "🏡");

        let result = storage.update_category(
            rent.id,
            &CategoryUpdate {
                name: Some(" ".into()),
                ..Default::default()
            },
        );
        assert!(result.unwrap_err().is_validation());
    }
}
