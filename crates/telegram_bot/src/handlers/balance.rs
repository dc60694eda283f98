use engine::parse_amount;
use teloxide::prelude::*;

use super::{
    HandlerResult, delete_message, delete_working_message, prompt, send_html, show_month_screen,
};
use crate::{ConfigParameters, ui};

/// Typed starting balance; zero is accepted, negatives are not.
pub(super) async fn received(
    bot: &Bot,
    msg: &Message,
    cfg: &ConfigParameters,
    text: &str,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    delete_message(bot, chat_id, msg.id).await;

    let Ok(balance) = parse_amount(text) else {
        return prompt(bot, chat_id, cfg, ui::BAD_BALANCE_TEXT, None).await;
    };

    cfg.ledger.set_balance(balance.to_major()).await?;
    tracing::info!(%balance, "starting balance set");

    delete_working_message(bot, chat_id, cfg).await;
    send_html(
        bot,
        chat_id,
        format!("✅ Баланс установлен: <b>{}</b> ₽", balance.format_number()),
    )
    .await?;
    show_month_screen(bot, chat_id, cfg).await
}
