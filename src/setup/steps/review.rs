//! Final review before anything is saved

use crate::error::BudgetResult;
use crate::setup::wizard::{SetupWizard, WizardStep};

use super::{header, prompt_yes_no};

pub struct ReviewStep;

impl ReviewStep {
    /// Show the totals and ask for confirmation
    pub fn run(wizard: &SetupWizard) -> BudgetResult<bool> {
        header(wizard.step(), WizardStep::Review.title());

        println!("  Salary:               {}", wizard.salary);
        println!("  Previous credit debt: {}", wizard.previous_debt);
        println!("  Savings:              {}", wizard.savings_total());
        println!("  Rent:                 {}", wizard.rent_total());
        println!("  Usable credit:        {}", wizard.credit_goal);
        println!("  Available credit:     {}", wizard.credit_available());
        println!();
        println!("  Liquidity:            {}", wizard.liquidity_preview());
        println!();

        prompt_yes_no("Save this setup?", true)
    }
}
