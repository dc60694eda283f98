use std::{collections::HashMap, sync::Arc};

use api_types::transaction::TransactionRow;
use engine::{Clarification, Draft, EntryKind, MoneyCents};
use teloxide::types::{ChatId, MessageId};
use tokio::sync::Mutex;

/// Where the conversation with a chat currently stands.
///
/// The step decides what a plain text message means; buttons carry their own
/// meaning in the callback data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Step {
    /// No conversation: text is read as a quick entry.
    #[default]
    Idle,
    /// Month screen shown: text is read as a quick entry.
    Menu,
    ChooseType,
    ExpenseCategory,
    ExpenseSubcategory,
    IncomeCategory,
    Amount,
    Comment,
    AnalysisKind,
    AnalysisPeriod,
    SetBalance,
    EditSelect,
    EditField,
    EditValue,
    QuickConfirm,
    QuickEditField,
    QuickEditValue,
}

/// Entry being built through the button wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WizardDraft {
    pub kind: EntryKind,
    pub category: Option<String>,
    pub subcategory: String,
    pub amount: Option<MoneyCents>,
}

impl WizardDraft {
    pub(crate) fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            category: None,
            subcategory: String::new(),
            amount: None,
        }
    }
}

/// Entry typed in one line, waiting for confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum QuickEntry {
    Ready(Draft),
    Choosing(Clarification),
}

/// Field of a quick entry being changed from the edit menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QuickField {
    Kind,
    Amount,
    Category,
    Subcategory,
    Comment,
}

/// Field of an existing ledger row being changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordField {
    Amount,
    Comment,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Session {
    pub step: Step,
    /// Bot prompt that is removed once the user answers it.
    pub working_message: Option<MessageId>,
    pub wizard: Option<WizardDraft>,
    pub quick: Option<QuickEntry>,
    pub quick_field: Option<QuickField>,
    pub records: Vec<TransactionRow>,
    pub selected: Option<TransactionRow>,
    pub record_field: Option<RecordField>,
    pub analysis_kind: Option<EntryKind>,
}

impl Session {
    /// Ready quick draft, if the user is past the suggestion picker.
    pub(crate) fn quick_draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.quick {
            Some(QuickEntry::Ready(draft)) => Some(draft),
            _ => None,
        }
    }

    pub(crate) fn quick_draft(&self) -> Option<&Draft> {
        match &self.quick {
            Some(QuickEntry::Ready(draft)) => Some(draft),
            _ => None,
        }
    }

    /// Drops everything but the working message id, as `/start` does.
    pub(crate) fn reset(&mut self) {
        *self = Session {
            working_message: self.working_message,
            ..Session::default()
        };
    }

    pub(crate) fn clear_quick(&mut self) {
        self.quick = None;
        self.quick_field = None;
    }
}

#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    inner: Arc<Mutex<HashMap<ChatId, Session>>>,
}

impl SessionStore {
    pub(crate) async fn get(&self, chat_id: ChatId) -> Session {
        let guard = self.inner.lock().await;
        guard.get(&chat_id).cloned().unwrap_or_default()
    }

    pub(crate) async fn update<F>(&self, chat_id: ChatId, f: F) -> Session
    where
        F: FnOnce(&mut Session),
    {
        let mut guard = self.inner.lock().await;
        let session = guard.entry(chat_id).or_default();
        f(session);
        session.clone()
    }

    pub(crate) async fn set_step(&self, chat_id: ChatId, step: Step) {
        self.update(chat_id, |s| s.step = step).await;
    }

    /// Takes the working message id out of the session.
    pub(crate) async fn take_working_message(&self, chat_id: ChatId) -> Option<MessageId> {
        let mut guard = self.inner.lock().await;
        guard
            .get_mut(&chat_id)
            .and_then(|session| session.working_message.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Draft {
        Draft {
            kind: EntryKind::Expense,
            amount: MoneyCents::new(100),
            category: "Дом".to_string(),
            subcategory: "Мебель".to_string(),
            comment: String::new(),
        }
    }

    #[tokio::test]
    async fn update_creates_and_keeps_sessions_per_chat() {
        let store = SessionStore::default();
        store.set_step(ChatId(1), Step::Amount).await;
        store
            .update(ChatId(2), |s| s.analysis_kind = Some(EntryKind::Income))
            .await;

        assert_eq!(store.get(ChatId(1)).await.step, Step::Amount);
        assert_eq!(store.get(ChatId(2)).await.step, Step::Idle);
        assert_eq!(
            store.get(ChatId(2)).await.analysis_kind,
            Some(EntryKind::Income)
        );
        assert_eq!(store.get(ChatId(3)).await.step, Step::Idle);
    }

    #[tokio::test]
    async fn working_message_is_taken_once() {
        let store = SessionStore::default();
        store
            .update(ChatId(1), |s| s.working_message = Some(MessageId(10)))
            .await;

        assert_eq!(store.take_working_message(ChatId(1)).await, Some(MessageId(10)));
        assert_eq!(store.take_working_message(ChatId(1)).await, None);
        assert_eq!(store.take_working_message(ChatId(9)).await, None);
    }

    #[test]
    fn reset_keeps_only_the_working_message() {
        let mut session = Session {
            step: Step::QuickEditValue,
            working_message: Some(MessageId(5)),
            quick: Some(QuickEntry::Ready(draft())),
            quick_field: Some(QuickField::Amount),
            ..Session::default()
        };
        session.reset();

        assert_eq!(session.step, Step::Idle);
        assert_eq!(session.working_message, Some(MessageId(5)));
        assert!(session.quick.is_none());
        assert!(session.quick_field.is_none());
    }

    #[test]
    fn quick_draft_only_when_ready() {
        let mut session = Session::default();
        assert!(session.quick_draft().is_none());

        session.quick = Some(QuickEntry::Ready(draft()));
        if let Some(draft) = session.quick_draft_mut() {
            draft.comment = "диван".to_string();
        }
        assert_eq!(session.quick_draft().map(|d| d.comment.as_str()), Some("диван"));

        session.clear_quick();
        assert!(session.quick.is_none());
    }
}
