//! Prompt variations, so the wizard does not sound like a form.

use engine::EntryKind;
use rand::seq::SliceRandom;

const EXPENSE_CATEGORY: &[&str] = &[
    "На что потратилась, Иришка? 🙂",
    "Куда сегодня ушли денежки, Иришка?",
    "Что оплатили? Давай выберем категорию.",
    "Окей, рассказывай: что за трата?",
    "Давай зафиксируем: какая категория?",
    "Выбирай, на что это было 🙂",
    "На что записываем расход?",
    "Что купила? 🙂",
    "Куда улетели денежки? 🙂",
];

/// `{cat}` is replaced with the bold category name.
const EXPENSE_SUBCATEGORY: &[&str] = &[
    "{cat}, а точнее?",
    "Понял(а). А внутри {cat} что именно?",
    "Уточним: {cat} → какой пункт?",
    "Что конкретно в {cat}?",
    "Окей, а точнее в {cat}?",
    "Выбери подкатегорию, пожалуйста.",
    "Какая подкатегория подходит лучше всего?",
    "В {cat} какой раздел?",
    "Давай точнее в рамках {cat}.",
    "Что именно из {cat}?",
];

const EXPENSE_AMOUNT: &[&str] = &[
    "И сколько там?",
    "Какая сумма?",
    "На сколько вышло?",
    "Сколько списалось?",
    "Сколько запишем?",
    "Окей, цифру скажи 🙂",
    "Сколько это стоило?",
    "Давай сумму.",
    "Сколько получилось?",
    "Ммм, и сколько там?",
];

const EXPENSE_COMMENT: &[&str] = &[
    "Да норм, это недорого! Добавишь коммент?",
    "Коммент добавим или пропускаем?",
    "Хочешь уточнение для себя? (необязательно)",
    "Добавим короткий коммент? 🙂",
    "Если есть деталь, напиши. Если нет, пропускай.",
    "Коммент оставим? (можно пропустить)",
    "Одной фразой что это было? (или пропусти)",
    "Есть что дописать? 🙂",
    "Добавишь пояснение? (не обязательно)",
    "Оставим заметку? (если хочешь)",
];

const EXPENSE_SAVED: &[&str] = &[
    "Всё понял, записал ✅",
    "Готово ✅ Зафиксировал.",
    "Записано ✅ Спасибо.",
    "Есть ✅ Сохранил.",
    "Сделано ✅",
    "Принял ✅ Добавил в таблицу.",
    "Угу ✅ Зафиксировал.",
    "Окей ✅ Записал.",
    "Отлично ✅ Внес.",
    "Готово ✅",
];

const INCOME_CATEGORY: &[&str] = &[
    "Опачки, денежки! И кто такой добрый?",
    "Ого! Доходик пришёл 🙂 От кого?",
    "Денежки пришли, записываем. Кто источник?",
    "Супер! Откуда поступление?",
    "Окей, выбери источник дохода 🙂",
    "Поступление! Кто молодец?",
    "Доход! Давай категорию.",
    "Ну красота 🙂 Кто отправитель?",
    "Денежки прилетели. Откуда?",
    "Кто сегодня пополнил копилочку? 🙂",
];

const INCOME_AMOUNT: &[&str] = &[
    "Ммм, и сколько там?",
    "И сколько пришло?",
    "Какая сумма?",
    "Сколько запишем?",
    "На сколько пополнились?",
    "Окей, цифру скажи 🙂",
    "Сколько поступило?",
    "Давай сумму.",
    "Сколько получилось?",
    "Сколько там денежек?",
];

const INCOME_COMMENT: &[&str] = &[
    "Нормально так! Коммент оставишь?",
    "Хочешь добавить коммент? (необязательно)",
    "Добавим уточнение? (можно пропустить)",
    "Коммент напишешь? 🙂",
    "Если есть деталь, напиши. Если нет, пропускай.",
    "Оставим заметку?",
    "Одной фразой: что это было? (или пропусти)",
    "Добавишь пояснение?",
    "Коммент нужен?",
    "Есть что уточнить? 🙂",
];

const INCOME_SAVED: &[&str] = &[
    "Красотка, всё записал ✅",
    "Готово ✅ Записал поступление.",
    "Есть ✅ Сохранил.",
    "Отлично ✅ Зафиксировал.",
    "Принял ✅",
    "Сделано ✅",
    "Записано ✅",
    "Окей ✅ Всё занёс.",
    "Угу ✅ В таблице.",
    "Красота ✅",
];

fn pick(pool: &'static [&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

pub(crate) fn category_prompt(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => pick(EXPENSE_CATEGORY),
        EntryKind::Income => pick(INCOME_CATEGORY),
    }
}

/// Subcategory prompt for `category`, as HTML.
pub(crate) fn subcategory_prompt(category: &str) -> String {
    let bold = format!("<b>{}</b>", teloxide::utils::html::escape(category));
    pick(EXPENSE_SUBCATEGORY).replace("{cat}", &bold)
}

pub(crate) fn amount_prompt(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => pick(EXPENSE_AMOUNT),
        EntryKind::Income => pick(INCOME_AMOUNT),
    }
}

pub(crate) fn comment_prompt(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => pick(EXPENSE_COMMENT),
        EntryKind::Income => pick(INCOME_COMMENT),
    }
}

pub(crate) fn saved_header(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Expense => pick(EXPENSE_SAVED),
        EntryKind::Income => pick(INCOME_SAVED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_come_from_the_right_pool() {
        for _ in 0..20 {
            assert!(EXPENSE_SAVED.contains(&saved_header(EntryKind::Expense)));
            assert!(INCOME_SAVED.contains(&saved_header(EntryKind::Income)));
            assert!(INCOME_AMOUNT.contains(&amount_prompt(EntryKind::Income)));
        }
    }

    #[test]
    fn subcategory_prompt_never_leaks_placeholder() {
        for _ in 0..50 {
            let prompt = subcategory_prompt("Дом");
            assert!(!prompt.contains("{cat}"));
        }
    }

    #[test]
    fn saved_headers_carry_a_check_mark() {
        assert!(EXPENSE_SAVED.iter().chain(INCOME_SAVED).all(|p| p.contains('✅')));
    }
}
