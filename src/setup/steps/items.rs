//! Staging fixed expenses and contributions for savings, rent and credit

use crate::error::BudgetResult;
use crate::models::Money;
use crate::setup::wizard::{SetupWizard, StagedAporte, StagedExpense, WizardStep};

use super::{header, prompt_money, prompt_string, prompt_yes_no};

/// Savings, rent and credit steps share the same item menu
pub struct ItemsStep;

impl ItemsStep {
    pub fn run(wizard: &mut SetupWizard) -> BudgetResult<()> {
        let step = wizard.current();
        header(wizard.step(), step.title());

        if step == WizardStep::Credit {
            println!("Your usable credit is how much card spending you allow this cycle.");
            wizard.credit_goal = prompt_money("Usable credit", wizard.credit_goal)?;
            println!();
        }

        loop {
            Self::print_staged(wizard, step);

            println!();
            println!("  1. Add fixed expense");
            if step.accepts_aportes() {
                println!("  2. Add contribution");
            }
            println!("  3. Remove item");
            println!("  4. Continue (default)");
            let choice = prompt_string("Select [4]: ")?;

            match choice.as_str() {
                "1" => Self::add_expense(wizard)?,
                "2" if step.accepts_aportes() => Self::add_aporte(wizard)?,
                "3" => Self::remove_item(wizard, step)?,
                "" | "4" => {
                    if wizard.can_proceed() {
                        return Ok(());
                    }
                    println!("Contributions cannot exceed the expenses of this category.");
                }
                _ => println!("Unknown option."),
            }
        }
    }

    fn print_staged(wizard: &SetupWizard, step: WizardStep) {
        let expenses = wizard.expenses(step);
        let aportes = wizard.aportes(step);

        println!();
        if expenses.is_empty() && aportes.is_empty() {
            println!("Nothing added yet.");
        }
        for (i, item) in expenses.iter().enumerate() {
            println!("  [{}] {}", i + 1, item);
        }
        for (i, item) in aportes.iter().enumerate() {
            println!("  [+{}] {}", i + 1, item);
        }

        match step {
            WizardStep::Savings => println!("Total: {}", wizard.savings_total()),
            WizardStep::Rent => println!("Total: {}", wizard.rent_total()),
            WizardStep::Credit => println!("Available credit: {}", wizard.credit_available()),
            _ => {}
        }
    }

    fn add_expense(wizard: &mut SetupWizard) -> BudgetResult<()> {
        let name = prompt_string("Name: ")?;
        let amount = prompt_money("Amount", Money::zero())?;
        let item = if prompt_yes_no("Permanent?", true)? {
            StagedExpense::permanent(name, amount)
        } else {
            let remaining = loop {
                match prompt_string("Remaining installments: ")?.parse::<u32>() {
                    Ok(n) => break n,
                    Err(_) => println!("Enter a whole number, 0 for the last one."),
                }
            };
            StagedExpense::installments(name, amount, remaining)
        };

        if let Err(e) = wizard.stage_expense(item) {
            println!("{}", e);
        }
        Ok(())
    }

    fn add_aporte(wizard: &mut SetupWizard) -> BudgetResult<()> {
        let name = prompt_string("Name: ")?;
        let amount = prompt_money("Amount", Money::zero())?;
        let is_fixed = prompt_yes_no("Repeats every month?", true)?;

        if let Err(e) = wizard.stage_aporte(StagedAporte::new(name, amount, is_fixed)) {
            println!("{}", e);
        }
        Ok(())
    }

    fn remove_item(wizard: &mut SetupWizard, step: WizardStep) -> BudgetResult<()> {
        let input = prompt_string("Item to remove (e.g. 1 or +1): ")?;
        let removed = match input.strip_prefix('+') {
            Some(n) if step.accepts_aportes() => n
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| wizard.remove_aporte(i))
                .map(|a| a.to_string()),
            Some(_) => None,
            None => input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| wizard.remove_expense(i))
                .map(|e| e.to_string()),
        };

        match removed {
            Some(label) => println!("Removed {}", label),
            None => println!("No such item."),
        }
        Ok(())
    }
}
