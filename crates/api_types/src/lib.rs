//! Wire types of the ledger web script.
//!
//! Every call is a JSON `POST` whose body is a [`Request`]: the `cmd` name,
//! the command fields and the ledger owner's Telegram id. The script answers
//! with a [`Response`] envelope.

use serde::{Deserialize, Serialize};

/// Direction of a ledger row, spelled the way the spreadsheet stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "расход")]
    Expense,
    #[serde(rename = "доход")]
    Income,
}

/// Outgoing request body.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    #[serde(flatten)]
    pub command: &'a Command,
    pub user_id: u64,
}

/// Response envelope: `{"ok": true, "data": {...}}` or
/// `{"ok": false, "error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    SummaryMonth,
    Add(transaction::TransactionNew),
    GetRecentTransactions {
        limit: u32,
    },
    Analysis {
        kind: TransactionKind,
        period: analysis::Period,
    },
    SetBalance {
        balance: f64,
    },
    DeleteTransaction {
        row_id: i64,
    },
    UpdateTransaction {
        row_id: i64,
        field: transaction::EditableField,
        value: transaction::FieldValue,
    },
}

impl Command {
    /// Name sent in the `cmd` field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SummaryMonth => "summary_month",
            Command::Add(_) => "add",
            Command::GetRecentTransactions { .. } => "get_recent_transactions",
            Command::Analysis { .. } => "analysis",
            Command::SetBalance { .. } => "set_balance",
            Command::DeleteTransaction { .. } => "delete_transaction",
            Command::UpdateTransaction { .. } => "update_transaction",
        }
    }

    pub fn update_amount(row_id: i64, amount: f64) -> Self {
        Command::UpdateTransaction {
            row_id,
            field: transaction::EditableField::Amount,
            value: transaction::FieldValue::Amount(amount),
        }
    }

    pub fn update_comment(row_id: i64, comment: String) -> Self {
        Command::UpdateTransaction {
            row_id,
            field: transaction::EditableField::Comment,
            value: transaction::FieldValue::Text(comment),
        }
    }
}

pub mod summary {
    use super::*;

    fn default_month_label() -> String {
        "Текущий месяц".to_string()
    }

    /// Totals of the current month, in roubles.
    #[derive(Clone, Debug, PartialEq, Deserialize)]
    pub struct MonthSummary {
        #[serde(default = "default_month_label")]
        pub month_label: String,
        #[serde(default)]
        pub expenses: f64,
        #[serde(default)]
        pub incomes: f64,
        /// Incomes minus expenses of the month.
        #[serde(default)]
        pub balance: f64,
        #[serde(default)]
        pub initial_balance: f64,
        #[serde(default)]
        pub current_balance: f64,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        /// Empty for incomes.
        pub subcategory: String,
        pub amount: f64,
        pub comment: String,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EditableField {
        Amount,
        Comment,
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    #[serde(untagged)]
    pub enum FieldValue {
        Amount(f64),
        Text(String),
    }

    /// A spreadsheet row as listed by `get_recent_transactions`.
    ///
    /// Text columns are read whatever the cell type: a comment typed as `500`
    /// arrives as a JSON number.
    #[derive(Clone, Debug, PartialEq, Deserialize)]
    pub struct TransactionRow {
        /// Spreadsheet row number, the handle used for edits.
        pub row_id: i64,
        /// Timestamp as stored in the sheet (ISO 8601 or `YYYY-MM-DD HH:MM:SS`).
        #[serde(default, deserialize_with = "cell::text")]
        pub date: String,
        /// Anything but `расход` is shown as an income.
        #[serde(rename = "type", deserialize_with = "cell::kind")]
        pub kind: TransactionKind,
        #[serde(default, deserialize_with = "cell::text")]
        pub category: String,
        #[serde(default, deserialize_with = "cell::optional")]
        pub subcategory: Option<String>,
        pub amount: f64,
        #[serde(default, deserialize_with = "cell::optional")]
        pub comment: Option<String>,
    }

    mod cell {
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        use crate::TransactionKind;

        fn render(value: Value) -> Option<String> {
            match value {
                Value::Null => None,
                Value::String(text) => Some(text),
                other => Some(other.to_string()),
            }
        }

        pub(super) fn optional<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<String>, D::Error> {
            Ok(render(Value::deserialize(deserializer)?))
        }

        pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
            Ok(optional(deserializer)?.unwrap_or_default())
        }

        pub(super) fn kind<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<TransactionKind, D::Error> {
            Ok(match optional(deserializer)?.as_deref().map(str::trim) {
                Some("расход") => TransactionKind::Expense,
                _ => TransactionKind::Income,
            })
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Deserialize)]
    pub struct RecentTransactions {
        #[serde(default)]
        pub transactions: Vec<TransactionRow>,
    }
}

pub mod analysis {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Period {
        Today,
        Month,
        Year,
    }

    fn default_title() -> String {
        "Анализ".to_string()
    }

    fn default_category() -> String {
        "?".to_string()
    }

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    pub struct AnalysisItem {
        #[serde(default = "default_category")]
        pub category: String,
        #[serde(default)]
        pub amount: f64,
    }

    /// Per-category totals for a period.
    #[derive(Clone, Debug, PartialEq, Deserialize)]
    pub struct Analysis {
        #[serde(default = "default_title")]
        pub title: String,
        #[serde(default)]
        pub items: Vec<AnalysisItem>,
    }
}
