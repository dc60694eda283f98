//! Step-by-step entry: type, category, subcategory, amount, comment.

use engine::{Draft, EntryKind, catalog, parse_amount};
use teloxide::{prelude::*, types::MessageId};

use super::{
    Alert, HandlerResult, delete_message, delete_working_message, edit_or_send, prompt,
    show_month_screen,
};
use crate::{
    ConfigParameters,
    api::new_transaction,
    phrases,
    state::{Step, WizardDraft},
    ui,
};

pub(super) async fn choose_type(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    kind: EntryKind,
) -> HandlerResult<Alert> {
    let kb = match kind {
        EntryKind::Expense => ui::expense_categories(),
        EntryKind::Income => ui::income_categories(),
    };
    let shown = edit_or_send(bot, chat_id, message_id, phrases::category_prompt(kind), Some(kb))
        .await?;

    cfg.sessions
        .update(chat_id, |s| {
            s.wizard = Some(WizardDraft::new(kind));
            s.working_message = Some(shown);
            s.step = match kind {
                EntryKind::Expense => Step::ExpenseCategory,
                EntryKind::Income => Step::IncomeCategory,
            };
        })
        .await;
    Ok(None)
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

    let shown = edit_or_send(
        bot,
        chat_id,
        message_id,
        phrases::subcategory_prompt(category),
        Some(ui::expense_subcategories(category)),
    )
    .await?;

    cfg.sessions
        .update(chat_id, |s| {
            let wizard = s
                .wizard
                .get_or_insert_with(|| WizardDraft::new(EntryKind::Expense));
            wizard.kind = EntryKind::Expense;
            wizard.category = Some(category.to_string());
            wizard.subcategory.clear();
            s.working_message = Some(shown);
            s.step = Step::ExpenseSubcategory;
        })
        .await;
    Ok(None)
}

pub(super) async fn expense_subcategory(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    idx: usize,
) -> HandlerResult<Alert> {
    let session = cfg.sessions.get(chat_id).await;
    let Some(category) = session.wizard.and_then(|w| w.category) else {
        delete_message(bot, chat_id, message_id).await;
        show_month_screen(bot, chat_id, cfg).await?;
        return Ok(None);
    };
    let Some(subcategory) = catalog::subcategory(&category, idx) else {
        return Ok(None);
    };

    ask_amount(bot, chat_id, message_id, cfg, EntryKind::Expense, subcategory).await
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
            let mut wizard = WizardDraft::new(EntryKind::Income);
            wizard.category = Some(category.to_string());
            s.wizard = Some(wizard);
        })
        .await;

    ask_amount(bot, chat_id, message_id, cfg, EntryKind::Income, "").await
}

async fn ask_amount(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    kind: EntryKind,
    subcategory: &str,
) -> HandlerResult<Alert> {
    let shown = edit_or_send(bot, chat_id, message_id, phrases::amount_prompt(kind), None).await?;
    cfg.sessions
        .update(chat_id, |s| {
            if let Some(wizard) = &mut s.wizard {
                wizard.subcategory = subcategory.to_string();
            }
            s.working_message = Some(shown);
            s.step = Step::Amount;
        })
        .await;
    Ok(None)
}

pub(super) async fn amount_received(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    delete_message(bot, chat_id, msg.id).await;

    let amount = match parse_amount(text) {
        Ok(amount) if amount.is_positive() => amount,
        _ => return prompt(bot, chat_id, cfg, ui::BAD_AMOUNT_TEXT, None).await,
    };

    let session = cfg
        .sessions
        .update(chat_id, |s| {
            if let Some(wizard) = &mut s.wizard {
                wizard.amount = Some(amount);
                s.step = Step::Comment;
            }
        })
        .await;
    let Some(wizard) = session.wizard else {
        delete_working_message(bot, chat_id, cfg).await;
        return show_month_screen(bot, chat_id, cfg).await;
    };

    prompt(
        bot,
        chat_id,
        cfg,
        phrases::comment_prompt(wizard.kind),
        Some(ui::skip_comment()),
    )
    .await
}

pub(super) async fn comment_skip(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    save_and_finish(bot, chat_id, cfg, String::new()).await?;
    Ok(None)
}

pub(super) async fn comment_received(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    delete_message(bot, msg.chat.id, msg.id).await;
    save_and_finish(bot, msg.chat.id, cfg, text.trim().to_string()).await
}

async fn save_and_finish(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    comment: String,
) -> HandlerResult {
    delete_working_message(bot, chat_id, cfg).await;

    let session = cfg.sessions.get(chat_id).await;
    let draft = session.wizard.and_then(|wizard| {
        Some(Draft {
            kind: wizard.kind,
            amount: wizard.amount?,
            category: wizard.category?,
            subcategory: wizard.subcategory,
            comment,
        })
    });
    let Some(draft) = draft else {
        return show_month_screen(bot, chat_id, cfg).await;
    };

    cfg.ledger.add_transaction(new_transaction(&draft)).await?;
    tracing::info!(category = %draft.category, amount = %draft.amount, "entry saved");
    cfg.sessions.update(chat_id, |s| s.wizard = None).await;

    let header = phrases::saved_header(draft.kind);
    bot.send_message(chat_id, ui::saved_text(header, &draft))
        .await?;
    show_month_screen(bot, chat_id, cfg).await
}
