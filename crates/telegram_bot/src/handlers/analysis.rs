use api_types::analysis::Period;
use engine::EntryKind;
use teloxide::{prelude::*, types::MessageId};

use super::{Alert, HandlerResult, delete_working_message, edit_or_send, show_month_screen};
use crate::{ConfigParameters, api::ledger_kind, state::Step, ui};

pub(super) async fn kind_selected(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    kind: EntryKind,
) -> HandlerResult<Alert> {
    cfg.sessions
        .update(chat_id, |s| {
            s.analysis_kind = Some(kind);
            s.step = Step::AnalysisPeriod;
        })
        .await;
    edit_or_send(
        bot,
        chat_id,
        message_id,
        ui::ANALYSIS_PERIOD_TEXT,
        Some(ui::analysis_period()),
    )
    .await?;
    Ok(None)
}

pub(super) async fn period_selected(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    period: &str,
) -> HandlerResult<Alert> {
    let period = match period {
        "today" => Period::Today,
        "month" => Period::Month,
        "year" => Period::Year,
        _ => return Ok(None),
    };
    let kind = cfg
        .sessions
        .get(chat_id)
        .await
        .analysis_kind
        .unwrap_or(EntryKind::Expense);

    let analysis = cfg.ledger.analysis(ledger_kind(kind), period).await?;

    delete_working_message(bot, chat_id, cfg).await;
    edit_or_send(bot, chat_id, message_id, ui::analysis_text(&analysis), None).await?;
    cfg.sessions.update(chat_id, |s| s.analysis_kind = None).await;
    show_month_screen(bot, chat_id, cfg).await?;
    Ok(None)
}
