//! Category CLI commands
//!
//! The four categories are fixed; only their display metadata can change.

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::BudgetResult;
use crate::models::CategoryUpdate;
use crate::services::CategoryService;
use crate::storage::Backend;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the categories
    List,

    /// Create any missing default categories
    Init,

    /// Edit a category's display metadata
    Edit {
        /// Category slug, name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon
        #[arg(short, long)]
        icon: Option<String>,
        /// New color (e.g. #10b981)
        #[arg(short, long)]
        color: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(backend: &dyn Backend, cmd: CategoryCommands) -> BudgetResult<()> {
    let mut service = CategoryService::new(backend);

    match cmd {
        CategoryCommands::List => {
            let categories = service.fetch()?;
            println!("{}", format_category_list(categories));
        }

        CategoryCommands::Init => {
            let categories = service.init_defaults()?;
            println!("{} categories ready.", categories.len());
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
            color,
            description,
        } => {
            service.fetch()?;
            let id = service.find(&category)?.id;
            let updated = service.update(
                id,
                &CategoryUpdate {
                    name,
                    icon,
                    color,
                    description,
                },
            )?;
            println!("Updated category: {} {}", updated.icon, updated.name);
        }
    }

    Ok(())
}
