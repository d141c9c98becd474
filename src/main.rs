use anyhow::Result;
use clap::{Parser, Subcommand};

use cyclebudget::cli::{
    handle_aporte_command, handle_category_command, handle_expense_command, handle_period_command,
    AporteCommands, CategoryCommands, ExpenseCommands, PeriodCommands,
};
use cyclebudget::config::{BudgetPaths, Settings};
use cyclebudget::display::{format_summary, MoneyFormat};
use cyclebudget::logging::init_tracing;
use cyclebudget::services::{Dashboard, PeriodService};
use cyclebudget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "cyclebudget",
    author = "Kaylee Beyene",
    version,
    about = "Salary-cycle and credit-cycle budgeting",
    long_about = "cyclebudget tracks your monthly salary against savings, rent, \
                  usable credit and liquidity, with card spending grouped into \
                  its own billing cycle."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Run the interactive setup wizard
    Setup,

    /// Show the dashboard for the active month
    Summary {
        /// Period ID, or "monthly" / "credit" (defaults to the active month)
        #[arg(short, long)]
        period: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Period commands
    #[command(subcommand)]
    Period(PeriodCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Contribution (aporte) commands
    #[command(subcommand)]
    Aporte(AporteCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    // Initialize storage
    let storage = Storage::open(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing cyclebudget at: {}", paths.data_dir().display());
            cyclebudget::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("The default categories have been created:");
            println!("  - Savings");
            println!("  - Rent");
            println!("  - Usable Credit");
            println!("  - Liquidity");
            println!();
            println!("Run 'cyclebudget setup' to enter your salary and fixed expenses.");
        }
        Some(Commands::Config) => {
            println!("cyclebudget Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:        {}", settings.currency_symbol);
            println!("  Thousands separator:    {}", settings.thousands_separator);
            println!("  Credit cycle start day: {}", settings.credit_cycle_start_day);
            println!("  Log filter:             {}", settings.log_filter);
            println!("  Setup completed:        {}", settings.setup_completed);
        }
        Some(Commands::Setup) => {
            cyclebudget::setup::run(&storage, &paths, &mut settings)?;
        }
        Some(Commands::Summary { period, json }) => {
            let summary = match period {
                Some(identifier) => {
                    let mut periods = PeriodService::new(&storage);
                    let id = periods.resolve(&identifier)?.id;
                    periods.summary(id)?
                }
                None => {
                    let mut dashboard = Dashboard::new(&storage);
                    let summary = dashboard.load()?.clone();
                    summary
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", format_summary(&summary, &MoneyFormat::new(&settings)));
            }
        }
        Some(Commands::Period(cmd)) => handle_period_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Aporte(cmd)) => handle_aporte_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        None => {
            println!("cyclebudget - salary-cycle and credit-cycle budgeting");
            println!();
            if cyclebudget::setup::needs_setup(&settings) {
                println!("Run 'cyclebudget setup' to get started.");
            }
            println!("Run 'cyclebudget --help' for usage information.");
        }
    }

    Ok(())
}
