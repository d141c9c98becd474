//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format the categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'cyclebudget init' to create default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        slug: c.slug.to_string(),
        icon: c.icon.clone(),
        name: c.name.clone(),
        color: c.color.clone(),
        description: c.description.clone().unwrap_or_default(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
