//! Domain rules of the finance bot.
//!
//! Nothing here talks to the network: the ledger lives in a spreadsheet behind
//! a web script, and this crate only knows how to read what the user typed and
//! which categories exist.

pub use amount::parse_amount;
pub use error::EngineError;
pub use money::MoneyCents;
pub use quick::{Clarification, Draft, QuickParse, Suggestion, parse_quick};

mod amount;
pub mod catalog;
mod error;
mod money;
mod quick;
pub mod similarity;

/// Direction of a ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// Sign shown next to entries: `➖` for expenses, `➕` for incomes.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            EntryKind::Expense => "➖",
            EntryKind::Income => "➕",
        }
    }

    /// Capitalized Russian name, as shown on cards.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            EntryKind::Expense => "Расход",
            EntryKind::Income => "Доход",
        }
    }
}
