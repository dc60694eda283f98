use std::time::Duration;

use api_types::{
    Command, Request, Response, TransactionKind,
    analysis::{Analysis, Period},
    summary::MonthSummary,
    transaction::{FieldValue, RecentTransactions, TransactionNew},
};
use engine::{Draft, EntryKind};
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};

/// Client of the ledger web script.
///
/// Every command is a JSON `POST` to the same URL, stamped with the ledger
/// owner's id.
#[derive(Clone, Debug)]
pub struct LedgerClient {
    client: Client,
    url: String,
    owner_id: u64,
}

/// Ledger spelling of an entry direction.
pub(crate) fn ledger_kind(kind: EntryKind) -> TransactionKind {
    match kind {
        EntryKind::Expense => TransactionKind::Expense,
        EntryKind::Income => TransactionKind::Income,
    }
}

pub(crate) fn entry_kind(kind: TransactionKind) -> EntryKind {
    match kind {
        TransactionKind::Expense => EntryKind::Expense,
        TransactionKind::Income => EntryKind::Income,
    }
}

/// Row to append for a confirmed draft.
pub(crate) fn new_transaction(draft: &Draft) -> TransactionNew {
    TransactionNew {
        kind: ledger_kind(draft.kind),
        category: draft.category.clone(),
        subcategory: draft.subcategory.clone(),
        amount: draft.amount.to_major(),
        comment: draft.comment.clone(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("ledger answered with a non-JSON body")]
    NonJson { body: String },
    #[error("unexpected ledger payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("ledger error: {0}")]
    Ledger(String),
}

impl LedgerClient {
    pub fn new(url: &str, owner_id: u64, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            owner_id,
        })
    }

    async fn post_json<TResp: DeserializeOwned>(
        &self,
        command: &Command,
    ) -> Result<Option<TResp>, ApiError> {
        tracing::debug!(cmd = command.name(), "sending ledger command");

        let body = Request {
            command,
            user_id: self.owner_id,
        };
        let text = self.client.post(&self.url).json(&body).send().await?.text().await?;

        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            tracing::error!(cmd = command.name(), body = %text, "ledger returned non-JSON response");
            return Err(ApiError::NonJson { body: text });
        };
        let response: Response<TResp> = serde_json::from_value(value)?;
        if !response.ok {
            let message = response.error.unwrap_or_else(|| "GAS error".to_string());
            tracing::error!(cmd = command.name(), %message, "ledger reported a failure");
            return Err(ApiError::Ledger(message));
        }
        Ok(response.data)
    }

    async fn fetch<TResp: DeserializeOwned>(&self, command: &Command) -> Result<TResp, ApiError> {
        self.post_json(command)
            .await?
            .ok_or_else(|| ApiError::Ledger(format!("{} returned no data", command.name())))
    }

    async fn execute(&self, command: &Command) -> Result<(), ApiError> {
        self.post_json::<IgnoredAny>(command).await.map(|_| ())
    }

    pub async fn summary_month(&self) -> Result<MonthSummary, ApiError> {
        self.fetch(&Command::SummaryMonth).await
    }

    pub async fn add_transaction(&self, transaction: TransactionNew) -> Result<(), ApiError> {
        self.execute(&Command::Add(transaction)).await
    }

    pub async fn recent_transactions(&self, limit: u32) -> Result<RecentTransactions, ApiError> {
        // A ledger without rows may answer `data: null`.
        Ok(self
            .post_json(&Command::GetRecentTransactions { limit })
            .await?
            .unwrap_or_default())
    }

    pub async fn analysis(
        &self,
        kind: TransactionKind,
        period: Period,
    ) -> Result<Analysis, ApiError> {
        self.fetch(&Command::Analysis { kind, period }).await
    }

    pub async fn set_balance(&self, balance: f64) -> Result<(), ApiError> {
        self.execute(&Command::SetBalance { balance }).await
    }

    pub async fn delete_transaction(&self, row_id: i64) -> Result<(), ApiError> {
        self.execute(&Command::DeleteTransaction { row_id }).await
    }

    /// Rewrites one field of a row; the field follows from the value kind.
    pub async fn update_transaction(&self, row_id: i64, value: FieldValue) -> Result<(), ApiError> {
        let command = match value {
            FieldValue::Amount(amount) => Command::update_amount(row_id, amount),
            FieldValue::Text(comment) => Command::update_comment(row_id, comment),
        };
        self.execute(&command).await
    }
}
