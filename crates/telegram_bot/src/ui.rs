use api_types::{
    analysis::Analysis,
    summary::MonthSummary,
    transaction::TransactionRow,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use engine::{Clarification, Draft, EngineError, EntryKind, MoneyCents, Suggestion, catalog};
use teloxide::{
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    utils::html::escape,
};

use crate::api::entry_kind;

pub(crate) const GREETING: &str = "Привет, Иришка! 🙂";
pub(crate) const DENY_TEXT: &str = "Извини, доступ только для Иришки 🙂";
pub(crate) const APOLOGY_TEXT: &str = "Ой, что-то пошло не так 🙈 Попробуем ещё раз?";
pub(crate) const CHOOSE_TYPE_TEXT: &str = "Что вносим?";
pub(crate) const ANALYSIS_KIND_TEXT: &str = "Что анализируем?";
pub(crate) const ANALYSIS_PERIOD_TEXT: &str = "За какой период?";
pub(crate) const RECORDS_TEXT: &str = "<b>Последние записи:</b>\n\nВыбери что исправить:";
pub(crate) const QUICK_EDIT_TEXT: &str =
    "<b>Что хочешь изменить?</b>\n\nНажми на поле для редактирования:";
pub(crate) const SET_BALANCE_PROMPT: &str = "Окей, напиши текущий баланс (число):";
pub(crate) const BAD_AMOUNT_TEXT: &str =
    "Не понял сумму 🙈\nНапиши, пожалуйста, например: 2500 / 2 500 / 2к";
pub(crate) const BAD_BALANCE_TEXT: &str =
    "Не понял число 🙈 Напиши ещё раз, например: 25000 / 25 000 / 25к";
pub(crate) const CANCELLED_TEXT: &str = "Отменено ❌";
pub(crate) const HELP_TEXT: &str = "🎯 <b>Быстрый ввод</b>\n\
Просто напиши одной строкой:\n\
• <i>продукты 1500</i>\n\
• <i>кафе 800 обед с другом</i>\n\
• <i>муж 50000</i>\n\n\
📋 <b>Или используй кнопки:</b>\n\
• Внести транзакцию\n\
• Скорректировать записи\n\
• Анализ\n\
• Установить баланс";

const BACK: &str = "⬅️ Назад";
const COMMENT_PREVIEW_CHARS: usize = 20;

/// Rouble amount from the ledger with kopecks, without the sign: `1 500.00`.
pub(crate) fn format_rub(value: f64) -> String {
    match MoneyCents::from_major(value) {
        Ok(amount) => amount.format_number(),
        Err(_) => format!("{value:.2}"),
    }
}

fn format_rub_whole(value: f64) -> String {
    match MoneyCents::from_major(value) {
        Ok(amount) => amount.format_whole(),
        Err(_) => format!("{value:.0} ₽"),
    }
}

pub(crate) fn month_screen(summary: &MonthSummary) -> String {
    format!(
        "<b>{}</b>\n\
         💰 Начальный баланс: <b>{}</b> ₽\n\
         ➖ Расходы: <b>{}</b> ₽\n\
         ➕ Доходы: <b>{}</b> ₽\n\
         📊 Баланс месяца: <b>{}</b> ₽\n\
         💳 Текущий баланс: <b>{}</b> ₽",
        escape(&summary.month_label),
        format_rub(summary.initial_balance),
        format_rub(summary.expenses),
        format_rub(summary.incomes),
        format_rub(summary.balance),
        format_rub(summary.current_balance),
    )
}

pub(crate) fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➕ Внести транзакцию", "menu:add")],
        vec![InlineKeyboardButton::callback("📝 Скорректировать записи", "menu:edit")],
        vec![InlineKeyboardButton::callback("📊 Анализ", "menu:analysis")],
        vec![InlineKeyboardButton::callback("💰 Установить баланс", "menu:set_balance")],
    ])
}

pub(crate) fn choose_type() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➖ Затраты", "type:expense")],
        vec![InlineKeyboardButton::callback("➕ Доход", "type:income")],
        vec![InlineKeyboardButton::callback(BACK, "back:menu")],
    ])
}

fn two_per_row<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    prefix: &str,
) -> Vec<Vec<InlineKeyboardButton>> {
    let buttons: Vec<InlineKeyboardButton> = labels
        .into_iter()
        .enumerate()
        .map(|(idx, label)| InlineKeyboardButton::callback(label, format!("{prefix}:{idx}")))
        .collect();
    buttons.chunks(2).map(<[_]>::to_vec).collect()
}

pub(crate) fn expense_categories() -> InlineKeyboardMarkup {
    let mut rows = two_per_row(catalog::expense_categories(), "expcat");
    rows.push(vec![InlineKeyboardButton::callback(BACK, "back:choose_type")]);
    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn expense_subcategories(category: &str) -> InlineKeyboardMarkup {
    let mut rows = two_per_row(catalog::subcategories(category).iter().copied(), "expsub");
    rows.push(vec![InlineKeyboardButton::callback(BACK, "back:exp_cat")]);
    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn income_categories() -> InlineKeyboardMarkup {
    let mut rows = two_per_row(catalog::income_categories(), "inccat");
    rows.push(vec![InlineKeyboardButton::callback(BACK, "back:choose_type")]);
    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn skip_comment() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Пропустить",
        "comment:skip",
    )]])
}

pub(crate) fn quick_confirm() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("✅ Да, сохранить", "quick:save")],
        vec![InlineKeyboardButton::callback("✏️ Изменить данные", "quick:edit")],
        vec![InlineKeyboardButton::callback("❌ Отмена", "quick:cancel")],
    ])
}

fn comment_preview(comment: &str) -> String {
    if comment.chars().count() > COMMENT_PREVIEW_CHARS {
        let head: String = comment.chars().take(COMMENT_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        comment.to_string()
    }
}

/// Field menu of a quick entry; every button shows the current value.
pub(crate) fn quick_edit(draft: &Draft) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![InlineKeyboardButton::callback(
            format!("Тип: {} {}", draft.kind.emoji(), draft.kind.title()),
            "quickedit:type",
        )],
        vec![InlineKeyboardButton::callback(
            format!("💰 Сумма: {}", draft.amount.format_whole()),
            "quickedit:amount",
        )],
        vec![InlineKeyboardButton::callback(
            format!("📁 Категория: {}", draft.category),
            "quickedit:category",
        )],
    ];

    if draft.kind == EntryKind::Expense {
        let subcategory = if draft.subcategory.is_empty() {
            "(не указана)"
        } else {
            draft.subcategory.as_str()
        };
        rows.push(vec![InlineKeyboardButton::callback(
            format!("📂 Подкатегория: {subcategory}"),
            "quickedit:subcategory",
        )]);
    }

    let comment = if draft.comment.is_empty() {
        "(пусто)".to_string()
    } else {
        comment_preview(&draft.comment)
    };
    rows.push(vec![InlineKeyboardButton::callback(
        format!("📝 Комментарий: {comment}"),
        "quickedit:comment",
    )]);
    rows.push(vec![InlineKeyboardButton::callback(
        "⬅️ Назад к подтверждению",
        "quickedit:back",
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn quick_type() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➖ Расход", "quicktype:expense")],
        vec![InlineKeyboardButton::callback("➕ Доход", "quicktype:income")],
        vec![InlineKeyboardButton::callback(BACK, "quicktype:back")],
    ])
}

pub(crate) fn suggestions(suggestions: &[Suggestion]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = suggestions
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            vec![InlineKeyboardButton::callback(
                format!("✅ {} {}", s.kind.emoji(), s.category),
                format!("quickcat:{idx}"),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("❌ Отмена", "quick:cancel")]);
    InlineKeyboardMarkup::new(rows)
}

pub(crate) fn analysis_kind() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("➖ Затраты", "akind:expense")],
        vec![InlineKeyboardButton::callback("➕ Доходы", "akind:income")],
        vec![InlineKeyboardButton::callback(BACK, "back:menu")],
    ])
}

pub(crate) fn analysis_period() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Сегодня", "aperiod:today")],
        vec![InlineKeyboardButton::callback("В этом месяце", "aperiod:month")],
        vec![InlineKeyboardButton::callback("В этом году", "aperiod:year")],
        vec![InlineKeyboardButton::callback(BACK, "back:analysis_kind")],
    ])
}

pub(crate) fn records(rows: &[TransactionRow], tz: Tz) -> InlineKeyboardMarkup {
    let mut buttons: Vec<Vec<InlineKeyboardButton>> = rows
        .iter()
        .map(|row| {
            let label = format!(
                "{} {} | {} | {}",
                entry_kind(row.kind).emoji(),
                render_timestamp(&row.date, tz, TimestampStyle::Date),
                row.category,
                format_rub_whole(row.amount),
            );
            vec![InlineKeyboardButton::callback(
                label,
                format!("edit_row:{}", row.row_id),
            )]
        })
        .collect();
    buttons.push(vec![InlineKeyboardButton::callback(BACK, "back:menu")]);
    InlineKeyboardMarkup::new(buttons)
}

pub(crate) fn record_field() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("💰 Изменить сумму", "edit_field:amount")],
        vec![InlineKeyboardButton::callback(
            "💬 Изменить комментарий",
            "edit_field:comment",
        )],
        vec![InlineKeyboardButton::callback("🗑 Удалить запись", "edit_field:delete")],
        vec![InlineKeyboardButton::callback(BACK, "back:edit_list")],
    ])
}

/// Confirmation card of a quick entry.
pub(crate) fn draft_card(draft: &Draft) -> String {
    let mut text = format!(
        "{} <b>{}</b>\n💰 Сумма: <b>{}</b> ₽\n📁 Категория: {}",
        draft.kind.emoji(),
        draft.kind.title(),
        draft.amount.format_number(),
        escape(&draft.category),
    );
    if draft.kind == EntryKind::Expense && !draft.subcategory.is_empty() {
        text.push_str(&format!(" → {}", escape(&draft.subcategory)));
    }
    if !draft.comment.is_empty() {
        text.push_str(&format!("\n📝 Комментарий: {}", escape(&draft.comment)));
    }
    text.push_str("\n\n<b>Всё верно?</b>");
    text
}

pub(crate) fn clarification_text(clarification: &Clarification) -> String {
    format!(
        "💰 Сумма: <b>{}</b> ₽\n📝 Возможно, ты имела в виду:\n\nВыбери категорию:",
        clarification.amount.format_number()
    )
}

/// Plain-text confirmation sent after the wizard saved an entry.
pub(crate) fn saved_text(header: &str, draft: &Draft) -> String {
    let mut text = match draft.kind {
        EntryKind::Expense => format!(
            "{header}\n{} → {} — {}",
            draft.category, draft.subcategory, draft.amount
        ),
        EntryKind::Income => format!("{header}\n{} — {}", draft.category, draft.amount),
    };
    let comment = draft.comment.trim();
    if !comment.is_empty() {
        text.push_str(&format!("\nКоммент: {comment}"));
    }
    text
}

pub(crate) fn record_detail(row: &TransactionRow, tz: Tz) -> String {
    let kind = entry_kind(row.kind);
    let mut text = format!(
        "<b>{} {}</b>\n📅 {}\n📂 {}",
        kind.emoji(),
        kind.title(),
        render_timestamp(&row.date, tz, TimestampStyle::Minutes),
        escape(&row.category),
    );
    if let Some(subcategory) = row.subcategory.as_deref().filter(|s| !s.is_empty()) {
        text.push_str(&format!(" → {}", escape(subcategory)));
    }
    text.push_str(&format!("\n💰 {} ₽", format_rub(row.amount)));
    if let Some(comment) = row.comment.as_deref().filter(|c| !c.is_empty()) {
        text.push_str(&format!("\n💬 {}", escape(comment)));
    }
    text.push_str("\n\n<b>Что хочешь изменить?</b>");
    text
}

pub(crate) fn amount_edit_prompt(current: f64) -> String {
    format!(
        "Текущая сумма: <b>{}</b> ₽\n\nВведи новую сумму:\n(например: 2500 / 2 500 / 2к)",
        format_rub(current)
    )
}

pub(crate) fn comment_edit_prompt(current: &str) -> String {
    let current = if current.is_empty() {
        "(пусто)".to_string()
    } else {
        escape(current)
    };
    format!("Текущий комментарий: <i>{current}</i>\n\nВведи новый комментарий:")
}

pub(crate) fn analysis_text(analysis: &Analysis) -> String {
    let mut text = format!("<b>{}</b>\n\n", escape(&analysis.title));
    if analysis.items.is_empty() {
        text.push_str("Данных пока нет.");
        return text;
    }
    for item in &analysis.items {
        text.push_str(&format!(
            "• {}: <b>{}</b> ₽\n",
            escape(&item.category),
            format_rub(item.amount)
        ));
    }
    text
}

/// HTML hint shown when a one-line entry cannot be read.
pub(crate) fn quick_error_text(err: &EngineError) -> String {
    match err {
        EngineError::MissingAmount => {
            "Не нашел сумму в сообщении 🙈\n\nПример: <i>продукты 1500</i> или <i>муж 50000</i>"
                .to_string()
        }
        EngineError::InvalidAmount(_) => {
            "Не понял сумму 🙈\n\nПример: <i>продукты 1500</i>".to_string()
        }
        EngineError::MissingCategory => {
            "Не нашел категорию 🙈\n\nПример: <i>продукты 1500</i> или <i>1500 продукты</i>"
                .to_string()
        }
        EngineError::UnknownCategory(keyword) => format!(
            "Не нашел категорию '<i>{}</i>' 🙈\n\n\
             <b>Примеры расходов:</b>\nпродукты 1500\nкафе 800\nтакси 300\n\n\
             <b>Примеры доходов:</b>\nмуж 50000\nподарок 5000",
            escape(keyword)
        ),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimestampStyle {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM`
    Minutes,
}

impl TimestampStyle {
    fn format(self) -> &'static str {
        match self {
            TimestampStyle::Date => "%Y-%m-%d",
            TimestampStyle::Minutes => "%Y-%m-%d %H:%M",
        }
    }

    fn raw_len(self) -> usize {
        match self {
            TimestampStyle::Date => 10,
            TimestampStyle::Minutes => 16,
        }
    }
}

/// Renders a ledger timestamp in `tz`.
///
/// RFC 3339 values are converted; naive `YYYY-MM-DD HH:MM[:SS]` values are
/// taken as already local. Anything else is cut to the style's length.
pub(crate) fn render_timestamp(raw: &str, tz: Tz, style: TimestampStyle) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&tz).format(style.format()).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format(style.format()).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(TimestampStyle::Date.format()).to_string();
    }
    raw.chars().take(style.raw_len()).collect()
}

#[cfg(test)]
mod tests {
    use api_types::{TransactionKind, analysis::AnalysisItem};
    use chrono_tz::Europe::Moscow;
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;

    fn callback_data(kb: &InlineKeyboardMarkup) -> Vec<String> {
        kb.inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn labels(kb: &InlineKeyboardMarkup) -> Vec<String> {
        kb.inline_keyboard
            .iter()
            .flatten()
            .map(|button| button.text.clone())
            .collect()
    }

    fn draft(kind: EntryKind) -> Draft {
        Draft {
            kind,
            amount: MoneyCents::new(150_000),
            category: "Дом".to_string(),
            subcategory: "Мебель".to_string(),
            comment: String::new(),
        }
    }

    fn row() -> TransactionRow {
        TransactionRow {
            row_id: 17,
            date: "2025-03-01T21:30:00.000Z".to_string(),
            kind: TransactionKind::Expense,
            category: "Дом".to_string(),
            subcategory: Some("Мебель".to_string()),
            amount: 1500.4,
            comment: Some("диван <новый>".to_string()),
        }
    }

    #[test]
    fn month_screen_formats_every_line() {
        let summary = MonthSummary {
            month_label: "Март 2025".to_string(),
            expenses: 12345.5,
            incomes: 50000.0,
            balance: 37654.5,
            initial_balance: 1000.0,
            current_balance: 38654.5,
        };
        let text = month_screen(&summary);
        assert!(text.starts_with("<b>Март 2025</b>\n"));
        assert!(text.contains("➖ Расходы: <b>12 345.50</b> ₽"));
        assert!(text.contains("💳 Текущий баланс: <b>38 654.50</b> ₽"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn category_keyboards_pair_buttons_and_end_with_back() {
        let kb = expense_categories();
        let rows = &kb.inline_keyboard;
        assert!(rows[..rows.len() - 1].iter().all(|row| row.len() <= 2));
        assert_eq!(callback_data(&kb).first().map(String::as_str), Some("expcat:0"));
        assert_eq!(callback_data(&kb).last().map(String::as_str), Some("back:choose_type"));

        let subs = expense_subcategories("Дом");
        assert_eq!(callback_data(&subs).last().map(String::as_str), Some("back:exp_cat"));
        assert_eq!(
            callback_data(&subs).len(),
            catalog::subcategories("Дом").len() + 1
        );

        let income = income_categories();
        assert_eq!(
            callback_data(&income).len(),
            catalog::income_categories().count() + 1
        );
    }

    #[test]
    fn quick_edit_hides_subcategory_for_income() {
        let expense = callback_data(&quick_edit(&draft(EntryKind::Expense)));
        assert!(expense.contains(&"quickedit:subcategory".to_string()));

        let income = callback_data(&quick_edit(&draft(EntryKind::Income)));
        assert!(!income.contains(&"quickedit:subcategory".to_string()));
        assert_eq!(income.last().map(String::as_str), Some("quickedit:back"));
    }

    #[test]
    fn quick_edit_shows_current_values() {
        let mut entry = draft(EntryKind::Expense);
        entry.comment = "очень длинный комментарий про диван".to_string();
        let shown = labels(&quick_edit(&entry));
        assert_eq!(shown[0], "Тип: ➖ Расход");
        assert_eq!(shown[1], "💰 Сумма: 1 500 ₽");
        assert_eq!(shown[3], "📂 Подкатегория: Мебель");
        assert_eq!(shown[4], "📝 Комментарий: очень длинный коммен...");

        entry.comment.clear();
        entry.subcategory.clear();
        let shown = labels(&quick_edit(&entry));
        assert_eq!(shown[3], "📂 Подкатегория: (не указана)");
        assert_eq!(shown[4], "📝 Комментарий: (пусто)");
    }

    #[test]
    fn suggestion_buttons_are_indexed() {
        let suggestions = [
            Suggestion {
                kind: EntryKind::Expense,
                category: "Подарки",
                subcategory: "Другое",
            },
            Suggestion {
                kind: EntryKind::Income,
                category: "Подарки",
                subcategory: "",
            },
        ];
        let kb = super::suggestions(&suggestions);
        assert_eq!(
            callback_data(&kb),
            vec!["quickcat:0", "quickcat:1", "quick:cancel"]
        );
        assert_eq!(labels(&kb)[1], "✅ ➕ Подарки");
    }

    #[test]
    fn record_list_label() {
        let kb = records(&[row()], Moscow);
        assert_eq!(labels(&kb)[0], "➖ 2025-03-02 | Дом | 1 500 ₽");
        assert_eq!(callback_data(&kb), vec!["edit_row:17", "back:menu"]);
    }

    #[test]
    fn record_detail_escapes_comment() {
        let text = record_detail(&row(), Moscow);
        assert!(text.starts_with("<b>➖ Расход</b>\n📅 2025-03-02 00:30\n📂 Дом → Мебель"));
        assert!(text.contains("💰 1 500.40 ₽"));
        assert!(text.contains("💬 диван &lt;новый&gt;"));
    }

    #[test]
    fn draft_card_lines() {
        let mut entry = draft(EntryKind::Expense);
        entry.comment = "для гостиной".to_string();
        assert_eq!(
            draft_card(&entry),
            "➖ <b>Расход</b>\n💰 Сумма: <b>1 500.00</b> ₽\n📁 Категория: Дом → Мебель\n\
             📝 Комментарий: для гостиной\n\n<b>Всё верно?</b>"
        );

        let income = Draft {
            subcategory: String::new(),
            ..draft(EntryKind::Income)
        };
        assert!(draft_card(&income).contains("📁 Категория: Дом\n\n"));
    }

    #[test]
    fn saved_text_mentions_comment_only_when_present() {
        let entry = draft(EntryKind::Expense);
        assert_eq!(
            saved_text("Готово ✅", &entry),
            "Готово ✅\nДом → Мебель — 1 500.00 ₽"
        );

        let income = Draft {
            comment: " премия ".to_string(),
            ..draft(EntryKind::Income)
        };
        assert_eq!(
            saved_text("Есть ✅", &income),
            "Есть ✅\nДом — 1 500.00 ₽\nКоммент: премия"
        );
    }

    #[test]
    fn analysis_text_lists_items_or_says_empty() {
        let empty = Analysis {
            title: "Расходы за месяц".to_string(),
            items: Vec::new(),
        };
        assert_eq!(analysis_text(&empty), "<b>Расходы за месяц</b>\n\nДанных пока нет.");

        let full = Analysis {
            title: "Расходы за год".to_string(),
            items: vec![AnalysisItem {
                category: "Дом".to_string(),
                amount: 2500.0,
            }],
        };
        assert!(analysis_text(&full).ends_with("• Дом: <b>2 500.00</b> ₽\n"));
    }

    #[test]
    fn quick_errors_escape_the_keyword() {
        let text = quick_error_text(&EngineError::UnknownCategory("<b>".to_string()));
        assert!(text.starts_with("Не нашел категорию '<i>&lt;b&gt;</i>' 🙈"));
        assert!(quick_error_text(&EngineError::MissingAmount).contains("Не нашел сумму"));
    }

    #[test]
    fn timestamps_render_in_zone_or_fall_back() {
        assert_eq!(
            render_timestamp("2025-01-31T22:15:00Z", Moscow, TimestampStyle::Minutes),
            "2025-02-01 01:15"
        );
        assert_eq!(
            render_timestamp("2025-01-31 22:15:09", Moscow, TimestampStyle::Minutes),
            "2025-01-31 22:15"
        );
        assert_eq!(
            render_timestamp("2025-01-31", Moscow, TimestampStyle::Minutes),
            "2025-01-31"
        );
        assert_eq!(
            render_timestamp("31.01.2025 22:15", Moscow, TimestampStyle::Date),
            "31.01.2025"
        );
    }
}
