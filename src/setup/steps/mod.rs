//! Setup wizard steps
//!
//! Interactive prompts for each page of the wizard. The steps only edit
//! the wizard state; nothing is persisted until the review step confirms.

pub mod basics;
pub mod items;
pub mod review;

use std::io::{self, Write};

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

pub use basics::BasicsStep;
pub use items::ItemsStep;
pub use review::ReviewStep;

/// Print a step header
pub(crate) fn header(step: u8, title: &str) {
    let line = format!("Step {} of {}: {}", step, super::wizard::TOTAL_STEPS, title);
    println!();
    println!("{}", line);
    println!("{}", "=".repeat(line.len()));
    println!();
}

/// Prompt for a string input
pub(crate) fn prompt_string(prompt: &str) -> BudgetResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(BudgetError::Setup("Input closed before setup finished".into()));
    }

    Ok(input.trim().to_string())
}

/// Prompt for an amount; an empty answer keeps `default`
pub(crate) fn prompt_money(prompt: &str, default: Money) -> BudgetResult<Money> {
    loop {
        let input = prompt_string(&format!("{} [{}]: ", prompt, default))?;
        if input.is_empty() {
            return Ok(default);
        }
        match Money::parse(&input) {
            Ok(amount) => return Ok(amount),
            Err(e) => println!("{}", e),
        }
    }
}

/// Prompt for a yes/no answer
pub(crate) fn prompt_yes_no(prompt: &str, default: bool) -> BudgetResult<bool> {
    let hint = if default { "yes" } else { "no" };
    let input = prompt_string(&format!("{} (yes/no) [{}]: ", prompt, hint))?;
    Ok(match input.to_lowercase().as_str() {
        "" => default,
        "y" | "yes" | "si" | "s" => true,
        _ => false,
    })
}
