//! Salary and previous credit debt

use crate::error::BudgetResult;
use crate::setup::wizard::SetupWizard;

use super::{header, prompt_money};

/// First step: monthly salary and what is still owed on the card
pub struct BasicsStep;

impl BasicsStep {
    pub fn run(wizard: &mut SetupWizard) -> BudgetResult<()> {
        header(wizard.step(), wizard.current().title());
        println!("Your salary is the money you receive this month.");
        println!("The previous credit debt is last cycle's card bill, paid out of it.");
        println!();

        loop {
            wizard.salary = prompt_money("Monthly salary", wizard.salary)?;
            if wizard.can_proceed() {
                break;
            }
            println!("Salary must be greater than zero.");
        }

        loop {
            wizard.previous_debt = prompt_money("Previous credit debt", wizard.previous_debt)?;
            if !wizard.previous_debt.is_negative() {
                break;
            }
            println!("Debt cannot be negative.");
        }

        Ok(())
    }
}
