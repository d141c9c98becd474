//! First-run setup wizard
//!
//! Walks the user through salary, savings, rent and credit, then saves
//! everything in one pass once the review is confirmed.

pub mod steps;
pub mod wizard;

pub use wizard::{ApplyReport, SetupWizard, StagedAporte, StagedExpense, WizardStep, TOTAL_STEPS};

use crate::config::{paths::BudgetPaths, settings::Settings};
use crate::error::BudgetResult;
use crate::storage::Backend;

use steps::{prompt_yes_no, BasicsStep, ItemsStep, ReviewStep};

/// Whether the wizard should be offered on this run
pub fn needs_setup(settings: &Settings) -> bool {
    !settings.setup_completed
}

/// Run the interactive setup wizard
///
/// Returns `None` when the user cancels before anything is saved.
pub fn run(
    backend: &dyn Backend,
    paths: &BudgetPaths,
    settings: &mut Settings,
) -> BudgetResult<Option<ApplyReport>> {
    println!();
    println!("===========================================");
    println!("  Welcome to the cyclebudget setup wizard!");
    println!("===========================================");
    println!();
    println!("This wizard sets up your current month and credit cycle.");
    println!("Press Ctrl+C at any time to cancel.");
    println!();

    if !prompt_yes_no("Ready to begin?", true)? {
        println!("Setup cancelled.");
        return Ok(None);
    }

    let mut wizard = SetupWizard::new();
    loop {
        match wizard.current() {
            WizardStep::Basics => BasicsStep::run(&mut wizard)?,
            WizardStep::Savings | WizardStep::Rent | WizardStep::Credit => {
                ItemsStep::run(&mut wizard)?
            }
            WizardStep::Review => {
                if ReviewStep::run(&wizard)? {
                    break;
                }
                if prompt_yes_no("Go back and make changes?", true)? {
                    wizard.back();
                    continue;
                }
                println!("Setup cancelled.");
                return Ok(None);
            }
        }
        wizard.next();
    }

    println!();
    println!("Applying settings...");
    let report = wizard.apply(backend)?;

    settings.setup_completed = true;
    settings.save(paths)?;

    println!();
    println!("Setup complete! {} changes saved.", report.applied);
    println!();
    println!("Here are some next steps:");
    println!("  - Run 'cyclebudget summary' to see your month");
    println!("  - Run 'cyclebudget expense add' to record spending");
    println!();

    Ok(Some(report))
}
