use api_types::transaction::FieldValue;
use engine::parse_amount;
use teloxide::{prelude::*, types::MessageId};

use super::{
    Alert, HandlerResult, delete_message, delete_working_message, edit_or_send, prompt,
    send_html, show_month_screen,
};
use crate::{
    ConfigParameters,
    state::{RecordField, Step},
    ui,
};

const RECENT_LIMIT: u32 = 10;

pub(super) async fn show_recent(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
) -> HandlerResult<Alert> {
    let rows = cfg
        .ledger
        .recent_transactions(RECENT_LIMIT)
        .await?
        .transactions;
    if rows.is_empty() {
        return Ok(Some("Записей пока нет"));
    }

    let kb = ui::records(&rows, cfg.timezone);
    cfg.sessions
        .update(chat_id, |s| {
            s.records = rows;
            s.selected = None;
            s.record_field = None;
            s.step = Step::EditSelect;
        })
        .await;
    edit_or_send(bot, chat_id, message_id, ui::RECORDS_TEXT, Some(kb)).await?;
    Ok(None)
}

pub(super) async fn select_row(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    row_id: i64,
) -> HandlerResult<Alert> {
    let session = cfg.sessions.get(chat_id).await;
    let Some(row) = session.records.into_iter().find(|r| r.row_id == row_id) else {
        return Ok(Some("Ошибка: запись не найдена"));
    };

    let text = ui::record_detail(&row, cfg.timezone);
    cfg.sessions
        .update(chat_id, |s| {
            s.selected = Some(row);
            s.step = Step::EditField;
        })
        .await;
    edit_or_send(bot, chat_id, message_id, text, Some(ui::record_field())).await?;
    Ok(None)
}

pub(super) async fn field_selected(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    field: &str,
) -> HandlerResult<Alert> {
    let Some(row) = cfg.sessions.get(chat_id).await.selected else {
        delete_message(bot, chat_id, message_id).await;
        show_month_screen(bot, chat_id, cfg).await?;
        return Ok(None);
    };

    let (field, text) = match field {
        "delete" => {
            cfg.ledger.delete_transaction(row.row_id).await?;
            tracing::info!(row_id = row.row_id, "ledger row deleted");
            edit_or_send(bot, chat_id, message_id, "✅ Запись удалена", None).await?;
            forget_selection(cfg, chat_id).await;
            show_month_screen(bot, chat_id, cfg).await?;
            return Ok(None);
        }
        "amount" => (RecordField::Amount, ui::amount_edit_prompt(row.amount)),
        "comment" => (
            RecordField::Comment,
            ui::comment_edit_prompt(row.comment.as_deref().unwrap_or_default()),
        ),
        _ => return Ok(None),
    };

    let shown = edit_or_send(bot, chat_id, message_id, text, None).await?;
    cfg.sessions
        .update(chat_id, |s| {
            s.record_field = Some(field);
            s.working_message = Some(shown);
            s.step = Step::EditValue;
        })
        .await;
    Ok(None)
}

pub(super) async fn value_received(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    delete_message(bot, chat_id, msg.id).await;

    let session = cfg.sessions.get(chat_id).await;
    let (Some(row), Some(field)) = (session.selected, session.record_field) else {
        delete_working_message(bot, chat_id, cfg).await;
        return show_month_screen(bot, chat_id, cfg).await;
    };

    let confirmation = match field {
        RecordField::Amount => {
            let amount = match parse_amount(text) {
                Ok(amount) if amount.is_positive() => amount,
                _ => return prompt(bot, chat_id, cfg, ui::BAD_AMOUNT_TEXT, None).await,
            };
            cfg.ledger
                .update_transaction(row.row_id, FieldValue::Amount(amount.to_major()))
                .await?;
            format!("✅ Сумма изменена на <b>{}</b> ₽", amount.format_number())
        }
        RecordField::Comment => {
            cfg.ledger
                .update_transaction(row.row_id, FieldValue::Text(text.trim().to_string()))
                .await?;
            "✅ Комментарий изменен".to_string()
        }
    };
    tracing::info!(row_id = row.row_id, ?field, "ledger row updated");

    delete_working_message(bot, chat_id, cfg).await;
    forget_selection(cfg, chat_id).await;
    send_html(bot, chat_id, confirmation).await?;
    show_month_screen(bot, chat_id, cfg).await
}

async fn forget_selection(cfg: &ConfigParameters, chat_id: ChatId) {
    cfg.sessions
        .update(chat_id, |s| {
            s.records.clear();
            s.selected = None;
            s.record_field = None;
        })
        .await;
}
