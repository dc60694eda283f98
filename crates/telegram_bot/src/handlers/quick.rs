//! One-line entries: confirmation card, suggestion picker and field editor.

use engine::{EntryKind, QuickParse, catalog, parse_amount, parse_quick};
use teloxide::{prelude::*, types::MessageId, utils::html::escape};

use super::{
    Alert, HandlerResult, delete_message, delete_working_message, edit_or_send, prompt,
    send_html, show_month_screen,
};
use crate::{
    ConfigParameters,
    api::new_transaction,
    phrases,
    state::{QuickEntry, QuickField, Step},
    ui,
};

/// Placeholder category left after switching the entry type.
const UNSET_CATEGORY: &str = "?";
const PICK_CATEGORY_FIRST: &str = "Сначала выбери категорию";

pub(super) async fn handle_input(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let parsed = match parse_quick(text) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(%err, "quick entry rejected");
            cfg.sessions
                .update(chat_id, |s| {
                    s.clear_quick();
                    s.step = Step::Idle;
                })
                .await;
            send_html(bot, chat_id, ui::quick_error_text(&err)).await?;
            return Ok(());
        }
    };

    let (text, kb, entry) = match parsed {
        QuickParse::Ready(draft) => (
            ui::draft_card(&draft),
            ui::quick_confirm(),
            QuickEntry::Ready(draft),
        ),
        QuickParse::NeedsClarification(clarification) => (
            ui::clarification_text(&clarification),
            ui::suggestions(&clarification.suggestions),
            QuickEntry::Choosing(clarification),
        ),
    };

    cfg.sessions
        .update(chat_id, |s| {
            s.quick = Some(entry);
            s.quick_field = None;
            s.step = Step::QuickConfirm;
        })
        .await;
    send_html(bot, chat_id, text).reply_markup(kb).await?;
    Ok(())
}

pub(super) async fn choose_suggestion(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    idx: usize,
) -> HandlerResult<Alert> {
    let session = cfg.sessions.get(chat_id).await;
    let Some(QuickEntry::Choosing(clarification)) = session.quick else {
        return expired(bot, chat_id, message_id, cfg).await;
    };
    let Some(suggestion) = clarification.suggestions.get(idx).copied() else {
        return Ok(None);
    };

    let draft = suggestion.into_draft(clarification.amount, clarification.comment);
    let text = ui::draft_card(&draft);
    cfg.sessions
        .update(chat_id, |s| {
            s.quick = Some(QuickEntry::Ready(draft));
            s.step = Step::QuickConfirm;
        })
        .await;
    edit_or_send(bot, chat_id, message_id, text, Some(ui::quick_confirm())).await?;
    Ok(None)
}

pub(super) async fn save(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    let session = cfg.sessions.get(chat_id).await;
    let Some(draft) = session.quick_draft() else {
        return expired(bot, chat_id, message_id, cfg).await;
    };
    if draft.category == UNSET_CATEGORY {
        return Ok(Some(PICK_CATEGORY_FIRST));
    }

    cfg.ledger.add_transaction(new_transaction(draft)).await?;
    tracing::info!(category = %draft.category, amount = %draft.amount, "quick entry saved");

    let header = phrases::saved_header(draft.kind);
    edit_or_send(bot, chat_id, message_id, format!("{header} 🎉"), None).await?;
    cfg.sessions.update(chat_id, |s| s.clear_quick()).await;
    show_month_screen(bot, chat_id, cfg).await?;
    Ok(None)
}

pub(super) async fn cancel(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    edit_or_send(bot, chat_id, message_id, ui::CANCELLED_TEXT, None).await?;
    cfg.sessions.update(chat_id, |s| s.clear_quick()).await;
    show_month_screen(bot, chat_id, cfg).await?;
    Ok(None)
}

pub(super) async fn edit_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    show_edit_menu(bot, chat_id, Some(message_id), cfg).await
}

/// Shows the field menu, in place when `message_id` is given.
pub(super) async fn show_edit_menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    let session = cfg
        .sessions
        .update(chat_id, |s| {
            s.quick_field = None;
            s.step = Step::QuickEditField;
        })
        .await;
    let Some(draft) = session.quick_draft() else {
        return match message_id {
            Some(message_id) => expired(bot, chat_id, message_id, cfg).await,
            None => show_month_screen(bot, chat_id, cfg).await.map(|_| None),
        };
    };

    let kb = ui::quick_edit(draft);
    match message_id {
        Some(message_id) => {
            edit_or_send(bot, chat_id, message_id, ui::QUICK_EDIT_TEXT, Some(kb)).await?;
        }
        None => {
            send_html(bot, chat_id, ui::QUICK_EDIT_TEXT)
                .reply_markup(kb)
                .await?;
        }
    }
    Ok(None)
}

pub(super) async fn edit_field(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    field: &str,
) -> HandlerResult<Alert> {
    let session = cfg.sessions.get(chat_id).await;
    let Some(draft) = session.quick_draft() else {
        return expired(bot, chat_id, message_id, cfg).await;
    };

    let (field, text, kb) = match field {
        "back" => {
            let text = ui::draft_card(draft);
            cfg.sessions
                .update(chat_id, |s| {
                    s.quick_field = None;
                    s.step = Step::QuickConfirm;
                })
                .await;
            edit_or_send(bot, chat_id, message_id, text, Some(ui::quick_confirm())).await?;
            return Ok(None);
        }
        "type" => (
            QuickField::Kind,
            "Выбери тип транзакции:".to_string(),
            Some(ui::quick_type()),
        ),
        "amount" => (
            QuickField::Amount,
            ui::amount_edit_prompt(draft.amount.to_major()),
            None,
        ),
        "category" => match draft.kind {
            EntryKind::Expense => (
                QuickField::Category,
                "Выбери категорию расхода:".to_string(),
                Some(ui::expense_categories()),
            ),
            EntryKind::Income => (
                QuickField::Category,
                "Выбери категорию дохода:".to_string(),
                Some(ui::income_categories()),
            ),
        },
        "subcategory" => {
            if draft.kind != EntryKind::Expense
                || catalog::subcategories(&draft.category).is_empty()
            {
                return Ok(Some(PICK_CATEGORY_FIRST));
            }
            (
                QuickField::Subcategory,
                format!(
                    "Выбери подкатегорию в <b>{}</b>:",
                    escape(&draft.category)
                ),
                Some(ui::expense_subcategories(&draft.category)),
            )
        }
        "comment" => (
            QuickField::Comment,
            ui::comment_edit_prompt(&draft.comment),
            None,
        ),
        _ => return Ok(None),
    };

    let shown = edit_or_send(bot, chat_id, message_id, text, kb).await?;
    cfg.sessions
        .update(chat_id, |s| {
            s.quick_field = Some(field);
            s.step = Step::QuickEditValue;
            if matches!(field, QuickField::Amount | QuickField::Comment) {
                s.working_message = Some(shown);
            }
        })
        .await;
    Ok(None)
}

pub(super) async fn type_selected(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    action: &str,
) -> HandlerResult<Alert> {
    let kind = match action {
        "expense" => EntryKind::Expense,
        "income" => EntryKind::Income,
        _ => return show_edit_menu(bot, chat_id, Some(message_id), cfg).await,
    };

    cfg.sessions
        .update(chat_id, |s| {
            if let Some(draft) = s.quick_draft_mut()
                && draft.kind != kind
            {
                draft.kind = kind;
                draft.category = UNSET_CATEGORY.to_string();
                draft.subcategory.clear();
            }
        })
        .await;
    show_edit_menu(bot, chat_id, Some(message_id), cfg).await
}

pub(super) async fn expense_category(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    idx: usize,
) -> HandlerResult<Alert> {
    let Some(category) = catalog::expense_category(idx) else {
        return Ok(None);
    };

    let session = cfg
        .sessions
        .update(chat_id, |s| {
            if let Some(draft) = s.quick_draft_mut() {
                draft.kind = EntryKind::Expense;
                draft.category = category.to_string();
                draft.subcategory = catalog::default_subcategory(category).to_string();
            }
        })
        .await;
    if session.quick_draft().is_none() {
        return expired(bot, chat_id, message_id, cfg).await;
    }

    edit_or_send(
        bot,
        chat_id,
        message_id,
        phrases::subcategory_prompt(category),
        Some(ui::expense_subcategories(category)),
    )
    .await?;
    Ok(None)
}

pub(super) async fn expense_subcategory(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    idx: usize,
) -> HandlerResult<Alert> {
    cfg.sessions
        .update(chat_id, |s| {
            if let Some(draft) = s.quick_draft_mut()
                && let Some(subcategory) = catalog::subcategory(&draft.category, idx)
            {
                draft.subcategory = subcategory.to_string();
            }
        })
        .await;
    show_edit_menu(bot, chat_id, Some(message_id), cfg).await
}

pub(super) async fn income_category(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    idx: usize,
) -> HandlerResult<Alert> {
    let Some(category) = catalog::income_category(idx) else {
        return Ok(None);
    };
    cfg.sessions
        .update(chat_id, |s| {
            if let Some(draft) = s.quick_draft_mut() {
                draft.kind = EntryKind::Income;
                draft.category = category.to_string();
                draft.subcategory.clear();
            }
        })
        .await;
    show_edit_menu(bot, chat_id, Some(message_id), cfg).await
}

pub(super) async fn edit_value_received(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    delete_message(bot, chat_id, msg.id).await;

    let field = cfg.sessions.get(chat_id).await.quick_field;
    match field {
        Some(QuickField::Amount) => {
            let amount = match parse_amount(text) {
                Ok(amount) if amount.is_positive() => amount,
                _ => return prompt(bot, chat_id, cfg, ui::BAD_AMOUNT_TEXT, None).await,
            };
            cfg.sessions
                .update(chat_id, |s| {
                    if let Some(draft) = s.quick_draft_mut() {
                        draft.amount = amount;
                    }
                })
                .await;
        }
        Some(QuickField::Comment) => {
            let comment = text.trim().to_string();
            cfg.sessions
                .update(chat_id, |s| {
                    if let Some(draft) = s.quick_draft_mut() {
                        draft.comment = comment;
                    }
                })
                .await;
        }
        _ => {}
    }

    delete_working_message(bot, chat_id, cfg).await;
    show_edit_menu(bot, chat_id, None, cfg).await.map(|_| ())
}

/// The card belongs to an entry this session no longer holds.
async fn expired(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    delete_message(bot, chat_id, message_id).await;
    cfg.sessions.update(chat_id, |s| s.clear_quick()).await;
    show_month_screen(bot, chat_id, cfg).await?;
    Ok(None)
}
