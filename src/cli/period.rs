//! Period CLI commands
//!
//! Active periods, listing, salary/goal/debt edits and closing.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_period_details, format_period_list, format_summary, MoneyFormat};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{PeriodKind, PeriodStatus};
use crate::services::PeriodService;
use crate::storage::{Backend, PeriodFilter};
use crate::ui::SalaryForm;

use super::{parse_amount, parse_date};

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show the active monthly period and credit cycle (created if missing)
    Active,

    /// List periods
    List {
        /// Only this kind (monthly or credit)
        #[arg(short, long)]
        kind: Option<String>,
        /// Only this status (active, closed, projected)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show period details
    Show {
        /// Period ID, or "monthly" / "credit" for the active one
        period: String,
    },

    /// Show the summary of a period
    Summary {
        /// Period ID, or "monthly" / "credit" for the active one
        #[arg(default_value = "monthly")]
        period: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the salary of a monthly period
    #[command(name = "set-salary")]
    SetSalary {
        /// Salary amount (e.g. 1.000.000)
        amount: String,
        /// Period ID (defaults to the active month)
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Set the usable credit of a credit cycle
    #[command(name = "set-credit-goal")]
    SetCreditGoal {
        /// Goal amount
        amount: String,
        /// Period ID (defaults to the active credit cycle)
        #[arg(short, long, default_value = "credit")]
        period: String,
    },

    /// Set what a credit cycle has spent (its debt for next month)
    #[command(name = "set-debt")]
    SetDebt {
        /// Debt amount
        amount: String,
        /// Period ID (defaults to the active credit cycle)
        #[arg(short, long, default_value = "credit")]
        period: String,
    },

    /// Close a period
    Close {
        /// Period ID, or "monthly" / "credit" for the active one
        period: String,
        /// End date (YYYY-MM-DD), if different from the period's
        #[arg(short, long)]
        end: Option<String>,
    },
}

fn parse_kind(input: &str) -> BudgetResult<PeriodKind> {
    input
        .parse::<PeriodKind>()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

fn parse_status(input: &str) -> BudgetResult<PeriodStatus> {
    input
        .parse::<PeriodStatus>()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Handle a period command
pub fn handle_period_command(
    backend: &dyn Backend,
    settings: &Settings,
    cmd: PeriodCommands,
) -> BudgetResult<()> {
    let mut service = PeriodService::new(backend);
    let fmt = MoneyFormat::new(settings);

    match cmd {
        PeriodCommands::Active => {
            for kind in PeriodKind::all() {
                let period = service.active(*kind)?;
                println!("{}", format_period_details(&period, &fmt));
            }
        }

        PeriodCommands::List { kind, status } => {
            let filter = PeriodFilter {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            let periods = service.fetch(&filter)?;
            println!("{}", format_period_list(periods, &fmt));
        }

        PeriodCommands::Show { period } => {
            let period = service.resolve(&period)?;
            print!("{}", format_period_details(&period, &fmt));
        }

        PeriodCommands::Summary { period, json } => {
            let id = service.resolve(&period)?.id;
            let summary = service.summary(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", format_summary(&summary, &fmt));
            }
        }

        PeriodCommands::SetSalary { amount, period } => {
            let salary = SalaryForm { value: amount }
                .build_salary()
                .map_err(BudgetError::Validation)?;
            let period = service.resolve(&period)?;
            if period.kind != PeriodKind::Monthly {
                return Err(BudgetError::Period(
                    "Salary belongs to a monthly period".into(),
                ));
            }
            let period = service.set_salary(period.id, salary)?;
            println!("Salary set to {}", fmt.money(period.salary));
        }

        PeriodCommands::SetCreditGoal { amount, period } => {
            let goal = parse_amount(&amount)?;
            let period = service.resolve(&period)?;
            if period.kind != PeriodKind::CreditCycle {
                return Err(BudgetError::Period(
                    "Usable credit belongs to a credit cycle".into(),
                ));
            }
            let period = service.set_credit_goal(period.id, goal)?;
            println!("Usable credit set to {}", fmt.money(period.goals.credit));
        }

        PeriodCommands::SetDebt { amount, period } => {
            let debt = parse_amount(&amount)?;
            let period = service.resolve(&period)?;
            if period.kind != PeriodKind::CreditCycle {
                return Err(BudgetError::Period("Debt belongs to a credit cycle".into()));
            }
            let period = service.set_total_spent(period.id, debt)?;
            println!("Credit cycle spend set to {}", fmt.money(period.total_spent));
        }

        PeriodCommands::Close { period, end } => {
            let end = end.as_deref().map(parse_date).transpose()?;
            let period = service.resolve(&period)?;
            let closed = service.close(period.id, end)?;
            println!("Closed {}", closed);
        }
    }

    Ok(())
}
