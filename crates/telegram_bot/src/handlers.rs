use engine::EntryKind;
use teloxide::{
    RequestError,
    prelude::*,
    types::{CallbackQuery, InlineKeyboardMarkup, MessageId, ParseMode, User},
};

use crate::{
    ConfigParameters,
    api::ApiError,
    commands::ChatCommand,
    state::{Session, Step, WizardDraft},
    ui,
};

mod analysis;
mod balance;
mod quick;
mod records;
mod wizard;

#[derive(Debug, thiserror::Error)]
pub(crate) enum HandlerError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] RequestError),
    #[error(transparent)]
    Ledger(#[from] ApiError),
}

pub(crate) type HandlerResult<T = ()> = Result<T, HandlerError>;

/// Text of the callback alert, if the button press needs one.
pub(crate) type Alert = Option<&'static str>;

/// Flow that receives category buttons and `back:` presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerOwner {
    Wizard,
    QuickEdit,
}

/// Category pickers belong to the quick entry only while one of its fields
/// is being changed; any other step hands them to the wizard.
fn picker_owner(session: &Session) -> PickerOwner {
    if session.step == Step::QuickEditValue && session.quick_field.is_some() {
        PickerOwner::QuickEdit
    } else {
        PickerOwner::Wizard
    }
}

/// Main menu buttons abandon whatever quick entry was open.
fn leave_for_menu(session: &mut Session) {
    session.clear_quick();
    session.step = Step::Menu;
}

pub(crate) async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: ChatCommand,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    if !is_allowed(&cfg, msg.from.as_ref()) {
        deny(&bot, chat_id, msg.from.as_ref()).await?;
        return Ok(());
    }

    let result = match cmd {
        ChatCommand::Start => start(&bot, chat_id, &cfg).await,
        ChatCommand::Help => send_html(&bot, chat_id, ui::HELP_TEXT)
            .await
            .map(|_| ())
            .map_err(HandlerError::from),
    };
    if let Err(err) = result {
        report(&bot, chat_id, err).await;
    }
    Ok(())
}

pub(crate) async fn handle_message(
    bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;
    if !is_allowed(&cfg, msg.from.as_ref()) {
        deny(&bot, chat_id, msg.from.as_ref()).await?;
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Prompts waiting for typed input win over quick entry.
    let step = cfg.sessions.get(chat_id).await.step;
    let result = match step {
        Step::Amount => wizard::amount_received(&bot, &msg, &cfg, text).await,
        Step::Comment => wizard::comment_received(&bot, &msg, &cfg, text).await,
        Step::SetBalance => balance::received(&bot, &msg, &cfg, text).await,
        Step::EditValue => records::value_received(&bot, &msg, &cfg, text).await,
        Step::QuickEditValue => quick::edit_value_received(&bot, &msg, &cfg, text).await,
        _ => quick::handle_input(&bot, chat_id, &cfg, text).await,
    };
    if let Err(err) = result {
        report(&bot, chat_id, err).await;
    }
    Ok(())
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, Some(&q.from)) {
        tracing::warn!(user_id = q.from.id.0, "unauthorized button press");
        bot.answer_callback_query(q.id.clone())
            .text(ui::DENY_TEXT)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let (Some(message), Some(data)) = (q.message.as_ref(), q.data.as_deref()) else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    let result = route_callback(&bot, chat_id, message_id, &cfg, data).await;

    let answer = bot.answer_callback_query(q.id.clone());
    let answer = match &result {
        Ok(Some(alert)) => answer.text(*alert).show_alert(true),
        _ => answer,
    };
    if let Err(err) = answer.await {
        tracing::debug!(%err, "failed to answer callback query");
    }

    if let Err(err) = result {
        report(&bot, chat_id, err).await;
    }
    Ok(())
}

async fn route_callback(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    data: &str,
) -> HandlerResult<Alert> {
    let Some((prefix, arg)) = data.split_once(':') else {
        tracing::warn!(data, "malformed callback data");
        return Ok(None);
    };
    let owner = picker_owner(&cfg.sessions.get(chat_id).await);

    match prefix {
        "menu" => menu(bot, chat_id, message_id, cfg, arg).await,
        "type" => match parse_kind(arg) {
            Some(kind) => wizard::choose_type(bot, chat_id, message_id, cfg, kind).await,
            None => Ok(None),
        },
        "expcat" => match (parse_index(arg), owner) {
            (Some(idx), PickerOwner::QuickEdit) => {
                quick::expense_category(bot, chat_id, message_id, cfg, idx).await
            }
            (Some(idx), PickerOwner::Wizard) => {
                wizard::expense_category(bot, chat_id, message_id, cfg, idx).await
            }
            (None, _) => Ok(None),
        },
        "expsub" => match (parse_index(arg), owner) {
            (Some(idx), PickerOwner::QuickEdit) => {
                quick::expense_subcategory(bot, chat_id, message_id, cfg, idx).await
            }
            (Some(idx), PickerOwner::Wizard) => {
                wizard::expense_subcategory(bot, chat_id, message_id, cfg, idx).await
            }
            (None, _) => Ok(None),
        },
        "inccat" => match (parse_index(arg), owner) {
            (Some(idx), PickerOwner::QuickEdit) => {
                quick::income_category(bot, chat_id, message_id, cfg, idx).await
            }
            (Some(idx), PickerOwner::Wizard) => {
                wizard::income_category(bot, chat_id, message_id, cfg, idx).await
            }
            (None, _) => Ok(None),
        },
        "comment" if arg == "skip" => wizard::comment_skip(bot, chat_id, cfg).await,
        "quick" => match arg {
            "save" => quick::save(bot, chat_id, message_id, cfg).await,
            "edit" => quick::edit_menu(bot, chat_id, message_id, cfg).await,
            "cancel" => quick::cancel(bot, chat_id, message_id, cfg).await,
            _ => Ok(None),
        },
        "quickcat" => match parse_index(arg) {
            Some(idx) => quick::choose_suggestion(bot, chat_id, message_id, cfg, idx).await,
            None => Ok(None),
        },
        "quickedit" => quick::edit_field(bot, chat_id, message_id, cfg, arg).await,
        "quicktype" => quick::type_selected(bot, chat_id, message_id, cfg, arg).await,
        "akind" => match parse_kind(arg) {
            Some(kind) => analysis::kind_selected(bot, chat_id, message_id, cfg, kind).await,
            None => Ok(None),
        },
        "aperiod" => analysis::period_selected(bot, chat_id, message_id, cfg, arg).await,
        "edit_row" => match arg.parse::<i64>() {
            Ok(row_id) => records::select_row(bot, chat_id, message_id, cfg, row_id).await,
            Err(_) => Ok(None),
        },
        "edit_field" => records::field_selected(bot, chat_id, message_id, cfg, arg).await,
        "back" => back(bot, chat_id, message_id, cfg, owner, arg).await,
        _ => {
            tracing::warn!(data, "unknown callback data");
            Ok(None)
        }
    }
}

async fn start(bot: &Bot, chat_id: ChatId, cfg: &ConfigParameters) -> HandlerResult {
    delete_working_message(bot, chat_id, cfg).await;
    cfg.sessions.update(chat_id, |s| s.reset()).await;

    let summary = cfg.ledger.summary_month().await?;
    let text = format!("{}\n\n{}", ui::GREETING, ui::month_screen(&summary));
    send_html(bot, chat_id, text)
        .reply_markup(ui::main_menu())
        .await?;
    cfg.sessions.set_step(chat_id, Step::Menu).await;
    Ok(())
}

async fn menu(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    action: &str,
) -> HandlerResult<Alert> {
    cfg.sessions.update(chat_id, leave_for_menu).await;

    match action {
        "add" => {
            cfg.sessions
                .update(chat_id, |s| {
                    s.step = Step::ChooseType;
                    s.wizard = None;
                })
                .await;
            edit_or_send(bot, chat_id, message_id, ui::CHOOSE_TYPE_TEXT, Some(ui::choose_type()))
                .await?;
        }
        "edit" => return records::show_recent(bot, chat_id, message_id, cfg).await,
        "analysis" => {
            cfg.sessions.set_step(chat_id, Step::AnalysisKind).await;
            edit_or_send(bot, chat_id, message_id, ui::ANALYSIS_KIND_TEXT, Some(ui::analysis_kind()))
                .await?;
        }
        "set_balance" => {
            let prompt =
                edit_or_send(bot, chat_id, message_id, ui::SET_BALANCE_PROMPT, None).await?;
            cfg.sessions
                .update(chat_id, |s| {
                    s.step = Step::SetBalance;
                    s.working_message = Some(prompt);
                })
                .await;
        }
        _ => {}
    }
    Ok(None)
}

async fn back(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    cfg: &ConfigParameters,
    owner: PickerOwner,
    dest: &str,
) -> HandlerResult<Alert> {
    // Category pickers opened from the quick edit menu lead back to it.
    if owner == PickerOwner::QuickEdit {
        return quick::show_edit_menu(bot, chat_id, Some(message_id), cfg).await;
    }
    let session = cfg.sessions.get(chat_id).await;

    match dest {
        "menu" => {
            delete_working_message(bot, chat_id, cfg).await;
            delete_message(bot, chat_id, message_id).await;
            cfg.sessions.update(chat_id, |s| s.wizard = None).await;
            show_month_screen(bot, chat_id, cfg).await?;
        }
        "choose_type" => {
            cfg.sessions.set_step(chat_id, Step::ChooseType).await;
            edit_or_send(bot, chat_id, message_id, ui::CHOOSE_TYPE_TEXT, Some(ui::choose_type()))
                .await?;
        }
        "exp_cat" => {
            let prompt = edit_or_send(
                bot,
                chat_id,
                message_id,
                crate::phrases::category_prompt(EntryKind::Expense),
                Some(ui::expense_categories()),
            )
            .await?;
            cfg.sessions
                .update(chat_id, |s| {
                    s.step = Step::ExpenseCategory;
                    s.working_message = Some(prompt);
                    let wizard = s
                        .wizard
                        .get_or_insert_with(|| WizardDraft::new(EntryKind::Expense));
                    wizard.category = None;
                    wizard.subcategory.clear();
                })
                .await;
        }
        "analysis_kind" => {
            cfg.sessions.set_step(chat_id, Step::AnalysisKind).await;
            edit_or_send(bot, chat_id, message_id, ui::ANALYSIS_KIND_TEXT, Some(ui::analysis_kind()))
                .await?;
        }
        "edit_list" => {
            cfg.sessions
                .update(chat_id, |s| {
                    s.step = Step::EditSelect;
                    s.selected = None;
                    s.record_field = None;
                })
                .await;
            let kb = ui::records(&session.records, cfg.timezone);
            edit_or_send(bot, chat_id, message_id, ui::RECORDS_TEXT, Some(kb)).await?;
        }
        _ => tracing::warn!(dest, "unknown back destination"),
    }
    Ok(None)
}

/// Sends the month summary with the main menu as a new message.
pub(crate) async fn show_month_screen(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
) -> HandlerResult {
    let summary = cfg.ledger.summary_month().await?;
    send_html(bot, chat_id, ui::month_screen(&summary))
        .reply_markup(ui::main_menu())
        .await?;
    cfg.sessions.set_step(chat_id, Step::Menu).await;
    Ok(())
}

pub(crate) fn send_html(
    bot: &Bot,
    chat_id: ChatId,
    text: impl Into<String>,
) -> <Bot as Requester>::SendMessage {
    bot.send_message(chat_id, text).parse_mode(ParseMode::Html)
}

/// Replaces the text of `message_id`, or sends a new message when the edit
/// is refused. Returns the id of the message now showing `text`.
pub(crate) async fn edit_or_send(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: impl Into<String>,
    kb: Option<InlineKeyboardMarkup>,
) -> ResponseResult<MessageId> {
    let text = text.into();
    let mut edit = bot
        .edit_message_text(chat_id, message_id, text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(kb) = &kb {
        edit = edit.reply_markup(kb.clone());
    }
    match edit.await {
        Ok(_) => return Ok(message_id),
        Err(err) => tracing::debug!(%err, "edit failed, sending a new message"),
    }

    let mut send = send_html(bot, chat_id, text);
    if let Some(kb) = kb {
        send = send.reply_markup(kb);
    }
    Ok(send.await?.id)
}

/// Deletes the previous prompt and sends `text` as the new one.
pub(crate) async fn prompt(
    bot: &Bot,
    chat_id: ChatId,
    cfg: &ConfigParameters,
    text: impl Into<String>,
    kb: Option<InlineKeyboardMarkup>,
) -> HandlerResult {
    delete_working_message(bot, chat_id, cfg).await;
    let mut send = send_html(bot, chat_id, text);
    if let Some(kb) = kb {
        send = send.reply_markup(kb);
    }
    let sent = send.await?;
    cfg.sessions
        .update(chat_id, |s| s.working_message = Some(sent.id))
        .await;
    Ok(())
}

pub(crate) async fn delete_working_message(bot: &Bot, chat_id: ChatId, cfg: &ConfigParameters) {
    if let Some(message_id) = cfg.sessions.take_working_message(chat_id).await {
        delete_message(bot, chat_id, message_id).await;
    }
}

pub(crate) async fn delete_message(bot: &Bot, chat_id: ChatId, message_id: MessageId) {
    if let Err(err) = bot.delete_message(chat_id, message_id).await {
        tracing::debug!(%err, message_id = message_id.0, "couldn't delete message");
    }
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    cfg.allowed_users.contains(&from.id)
}

async fn deny(bot: &Bot, chat_id: ChatId, from: Option<&User>) -> ResponseResult<()> {
    tracing::warn!(user_id = from.map(|u| u.id.0), "unauthorized message");
    bot.send_message(chat_id, ui::DENY_TEXT).await?;
    Ok(())
}

async fn report(bot: &Bot, chat_id: ChatId, err: HandlerError) {
    tracing::error!(%err, chat_id = chat_id.0, "handler failed");
    if let Err(err) = bot.send_message(chat_id, ui::APOLOGY_TEXT).await {
        tracing::debug!(%err, "failed to send the apology");
    }
}

fn parse_kind(arg: &str) -> Option<EntryKind> {
    match arg {
        "expense" => Some(EntryKind::Expense),
        "income" => Some(EntryKind::Income),
        _ => None,
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use engine::{Draft, MoneyCents};

    use crate::state::{QuickEntry, QuickField};

    fn quick_session(step: Step, field: Option<QuickField>) -> Session {
        Session {
            step,
            quick: Some(QuickEntry::Ready(Draft {
                kind: EntryKind::Expense,
                amount: MoneyCents::new(50_000),
                category: "Дом".to_string(),
                subcategory: "Мебель".to_string(),
                comment: String::new(),
            })),
            quick_field: field,
            ..Session::default()
        }
    }

    #[test]
    fn category_pickers_go_to_quick_edit_only_while_a_field_is_edited() {
        let editing = quick_session(Step::QuickEditValue, Some(QuickField::Category));
        assert_eq!(picker_owner(&editing), PickerOwner::QuickEdit);

        let confirming = quick_session(Step::QuickConfirm, None);
        assert_eq!(picker_owner(&confirming), PickerOwner::Wizard);

        assert_eq!(picker_owner(&Session::default()), PickerOwner::Wizard);
    }

    #[test]
    fn leftover_quick_field_does_not_capture_wizard_steps() {
        for step in [
            Step::ChooseType,
            Step::ExpenseCategory,
            Step::ExpenseSubcategory,
            Step::IncomeCategory,
            Step::AnalysisPeriod,
            Step::EditSelect,
        ] {
            let session = quick_session(step, Some(QuickField::Category));
            assert_eq!(picker_owner(&session), PickerOwner::Wizard, "{step:?}");
        }
    }

    #[test]
    fn menu_press_abandons_the_quick_edit() {
        let mut session = quick_session(Step::QuickEditValue, Some(QuickField::Category));
        leave_for_menu(&mut session);

        assert_eq!(session.step, Step::Menu);
        assert!(session.quick.is_none());
        assert!(session.quick_field.is_none());
        assert_eq!(picker_owner(&session), PickerOwner::Wizard);
    }

    #[test]
    fn kinds_and_indexes() {
        assert_eq!(parse_kind("expense"), Some(EntryKind::Expense));
        assert_eq!(parse_kind("income"), Some(EntryKind::Income));
        assert_eq!(parse_kind("refund"), None);
        assert_eq!(parse_index("3"), Some(3));
        assert_eq!(parse_index("-1"), None);
    }
}
