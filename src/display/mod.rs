//! Display formatting for terminal output
//!
//! Tables for summaries, periods and items. Amounts are written with the
//! currency symbol and thousands separator from the settings.

pub mod category;
pub mod items;
pub mod period;
pub mod summary;

use crate::config::settings::Settings;
use crate::models::Money;

pub use category::format_category_list;
pub use items::{format_aporte_list, format_expense_list};
pub use period::{format_period_details, format_period_list};
pub use summary::format_summary;

/// Money formatting taken from the settings
#[derive(Debug, Clone)]
pub struct MoneyFormat {
    symbol: String,
    separator: char,
}

impl MoneyFormat {
    pub fn new(settings: &Settings) -> Self {
        Self {
            symbol: settings.currency_symbol.clone(),
            separator: settings.thousands_separator,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.symbol, self.separator)
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
