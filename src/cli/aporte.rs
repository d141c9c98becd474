//! Contribution (aporte) CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_aporte_list, MoneyFormat};
use crate::error::{BudgetError, BudgetResult};
use crate::models::AporteUpdate;
use crate::services::{AporteService, CategoryService, PeriodService};
use crate::storage::Backend;
use crate::ui::AporteForm;

use super::{parse_amount, period_for_category};

/// Aporte subcommands
#[derive(Subcommand)]
pub enum AporteCommands {
    /// Record a contribution that offsets a category's expenses
    Add {
        /// Category (savings, rent, liquidity)
        category: String,
        /// Name
        name: String,
        /// Amount (e.g. 170.000)
        amount: String,
        /// Repeats every month
        #[arg(long)]
        fixed: bool,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Period ID (defaults to the active month)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List contributions
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Period ID (defaults to the active month)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Edit a contribution
    Edit {
        /// Aporte ID
        aporte: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a contribution
    Delete {
        /// Aporte ID
        aporte: String,
    },
}

/// Handle an aporte command
pub fn handle_aporte_command(
    backend: &dyn Backend,
    settings: &Settings,
    cmd: AporteCommands,
) -> BudgetResult<()> {
    let mut categories = CategoryService::new(backend);
    let mut periods = PeriodService::new(backend);
    let mut service = AporteService::new(backend);
    let fmt = MoneyFormat::new(settings);
    categories.fetch()?;

    match cmd {
        AporteCommands::Add {
            category,
            name,
            amount,
            fixed,
            description,
            period,
        } => {
            let category = categories.find(&category)?.clone();
            if !category.slug.accepts_contributions() {
                return Err(BudgetError::Validation(format!(
                    "The {} category does not take contributions",
                    category.name
                )));
            }
            let form = AporteForm {
                name,
                amount,
                is_fixed: fixed,
                description: description.unwrap_or_default(),
                error_message: None,
            };
            let new = form
                .build_aporte(category.id)
                .map_err(BudgetError::Validation)?;

            let period = period_for_category(&mut periods, &category, period.as_deref())?;
            let aporte = service.create(period.id, &new)?;

            println!("Recorded contribution: {} {}", aporte.name, fmt.money(aporte.amount));
            println!("  Category: {}", category.name);
            println!("  Type:     {}", aporte.label());
            println!("  ID:       {}", aporte.id);
        }

        AporteCommands::List { category, period } => {
            let category = category
                .as_deref()
                .map(|c| categories.find(c).cloned())
                .transpose()?;
            let period = periods.resolve(period.as_deref().unwrap_or("monthly"))?;

            let aportes = service.fetch(period.id, category.as_ref().map(|c| c.id))?;
            println!("Period: {}", period);
            println!("{}", format_aporte_list(aportes, categories.categories(), &fmt));
        }

        AporteCommands::Edit {
            aporte,
            name,
            amount,
            description,
        } => {
            service.fetch_all()?;
            let id = service.find(&aporte)?.id;
            let update = AporteUpdate {
                name,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
            };
            let updated = service.update(id, &update)?;
            println!("Updated contribution: {} {}", updated.name, fmt.money(updated.amount));
        }

        AporteCommands::Delete { aporte } => {
            service.fetch_all()?;
            let found = service.find(&aporte)?.clone();
            service.delete(found.id)?;
            println!("Deleted contribution: {} {}", found.name, fmt.money(found.amount));
        }
    }

    Ok(())
}
