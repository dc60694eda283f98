//! Category dictionaries shared by the wizard keyboards and the quick-entry
//! parser.
//!
//! Order is significant: keyboards address categories and subcategories by
//! their position in these tables.

/// Expense categories with their subcategories.
pub const EXPENSES: &[(&str, &[&str])] = &[
    (
        "Дети",
        &[
            "Кружки и секции",
            "Карманные деньги",
            "Медицинские расходы",
            "Детский сад",
            "Одежда",
            "Повседневные траты",
            "Игрушки",
            "Другое",
        ],
    ),
    (
        "Задолженности",
        &[
            "Кредитные карты",
            "Образовательный кредит",
            "Другие кредиты",
            "Налоги (федеральные)",
            "Налоги (муниципальные)",
            "Другое",
        ],
    ),
    (
        "Образование",
        &["Плата за образование", "Учебная литература", "Уроки музыки", "Другое"],
    ),
    (
        "Развлечения",
        &[
            "Книги",
            "Концерты",
            "Игры",
            "Хобби",
            "Кино",
            "Музыка",
            "Отдых на природе",
            "Фотографии",
            "Спорт",
            "Театр",
            "Телевидение",
            "Другое",
        ],
    ),
    (
        "Повседневные расходы",
        &[
            "Продукты",
            "Рестораны и кафе",
            "Средства гигиены",
            "Одежда",
            "Химчистка",
            "Косметические средства",
            "Подписки",
            "Другое",
        ],
    ),
    ("Подарки", &["Подарки", "Благотворительность", "Другое"]),
    (
        "Здоровье",
        &[
            "Обследования врачей/стоматолога/окулиста",
            "Услуги специалистов",
            "Лекарства",
            "Скорая помощь",
            "Другое",
        ],
    ),
    (
        "Дом",
        &[
            "Аренда/ипотека",
            "Налог на недвижимость",
            "Мебель",
            "Сад",
            "Товары для дома",
            "Обслуживание",
            "Ремонт",
            "Переезд",
            "Другое",
        ],
    ),
    (
        "Страхование",
        &[
            "Страхование автомобиля",
            "Медицинская страховка",
            "Страхование недвижимости",
            "Страхование жизни",
            "Другое",
        ],
    ),
    (
        "Домашние животные",
        &["Корм", "Ветеринар", "Игрушки", "Товары для животных", "Другое"],
    ),
    (
        "Техника",
        &[
            "Домены и хостинг",
            "Онлайн-сервисы",
            "Устройства",
            "Программное обеспечение",
            "Другое",
        ],
    ),
    (
        "Транспорт",
        &[
            "Топливо",
            "Платежи за автомобиль",
            "Ремонт",
            "Регистрация/водительские права",
            "Запчасти",
            "Общественный транспорт",
            "Такси и каршеринг",
        ],
    ),
    (
        "Путешествия",
        &["Авиабилеты", "Отели", "Питание", "Транспорт", "Развлечения", "Другое"],
    ),
    (
        "Услуги ЖКХ",
        &[
            "Телефон",
            "Телевидение",
            "Интернет",
            "Электричество",
            "Отопление/газ",
            "Вода",
            "Вывоз мусора",
            "Другое",
        ],
    ),
    (
        "Красота",
        &["Маникюр", "Педикюр", "Парикмахер", "Убирание волос", "Массаж", "Другое"],
    ),
];

/// Income sources.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Муж",
    "Государство",
    "% по вкладам",
    "Возвраты",
    "Подарки",
    "Случайные доходы",
    "Продажи",
];

/// Short keywords for expense categories, lower-case.
pub const EXPENSE_ALIASES: &[(&str, &str)] = &[
    ("дети", "Дети"),
    ("детям", "Дети"),
    ("ребенку", "Дети"),
    ("задолженности", "Задолженности"),
    ("долги", "Задолженности"),
    ("кредит", "Задолженности"),
    ("образование", "Образование"),
    ("учеба", "Образование"),
    ("развлечения", "Развлечения"),
    ("отдых", "Развлечения"),
    ("повседневные", "Повседневные расходы"),
    ("продукты", "Повседневные расходы"),
    ("еда", "Повседневные расходы"),
    ("кафе", "Повседневные расходы"),
    ("ресторан", "Повседневные расходы"),
    ("одежда", "Повседневные расходы"),
    ("подарки", "Подарки"),
    ("подарок", "Подарки"),
    ("здоровье", "Здоровье"),
    ("врач", "Здоровье"),
    ("лекарства", "Здоровье"),
    ("аптека", "Здоровье"),
    ("дом", "Дом"),
    ("мебель", "Дом"),
    ("ремонт", "Дом"),
    ("страхование", "Страхование"),
    ("страховка", "Страхование"),
    ("животные", "Домашние животные"),
    ("питомец", "Домашние животные"),
    ("кот", "Домашние животные"),
    ("собака", "Домашние животные"),
    ("техника", "Техника"),
    ("гаджеты", "Техника"),
    ("транспорт", "Транспорт"),
    ("топливо", "Транспорт"),
    ("бензин", "Транспорт"),
    ("такси", "Транспорт"),
    ("метро", "Транспорт"),
    ("путешествия", "Путешествия"),
    ("поездка", "Путешествия"),
    ("отель", "Путешествия"),
    ("жкх", "Услуги ЖКХ"),
    ("коммуналка", "Услуги ЖКХ"),
    ("свет", "Услуги ЖКХ"),
    ("вода", "Услуги ЖКХ"),
    ("интернет", "Услуги ЖКХ"),
    ("красота", "Красота"),
    ("маникюр", "Красота"),
    ("парикмахер", "Красота"),
];

/// Short keywords for income sources, lower-case.
pub const INCOME_ALIASES: &[(&str, &str)] = &[
    ("муж", "Муж"),
    ("зарплата", "Муж"),
    ("государство", "Государство"),
    ("пособие", "Государство"),
    ("проценты", "% по вкладам"),
    ("вклад", "% по вкладам"),
    ("возврат", "Возвраты"),
    ("вернули", "Возвраты"),
    ("подарок", "Подарки"),
    ("подарки", "Подарки"),
    ("продажа", "Продажи"),
];

/// Expense keywords that point at a specific subcategory.
pub const EXPENSE_SUBCATEGORY_ALIASES: &[(&str, &str)] = &[
    ("продукты", "Продукты"),
    ("еда", "Продукты"),
    ("кафе", "Рестораны и кафе"),
    ("ресторан", "Рестораны и кафе"),
    ("одежда", "Одежда"),
    ("врач", "Обследования врачей/стоматолога/окулиста"),
    ("лекарства", "Лекарства"),
    ("аптека", "Лекарства"),
    ("мебель", "Мебель"),
    ("ремонт", "Ремонт"),
    ("такси", "Такси и каршеринг"),
    ("метро", "Общественный транспорт"),
    ("бензин", "Топливо"),
    ("топливо", "Топливо"),
    ("отель", "Отели"),
    ("свет", "Электричество"),
    ("вода", "Вода"),
    ("интернет", "Интернет"),
    ("жкх", "Другое"),
    ("коммуналка", "Другое"),
    ("маникюр", "Маникюр"),
    ("парикмахер", "Парикмахер"),
];

const FALLBACK_SUBCATEGORY: &str = "Другое";

/// Expense category names, in keyboard order.
pub fn expense_categories() -> impl Iterator<Item = &'static str> {
    EXPENSES.iter().map(|(name, _)| *name)
}

pub fn expense_category(index: usize) -> Option<&'static str> {
    EXPENSES.get(index).map(|(name, _)| *name)
}

/// Subcategories of an expense category; empty for unknown names.
pub fn subcategories(category: &str) -> &'static [&'static str] {
    EXPENSES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

pub fn subcategory(category: &str, index: usize) -> Option<&'static str> {
    subcategories(category).get(index).copied()
}

/// Subcategory used when the user did not pick one: the last entry of the
/// list, which is the catch-all for most categories.
pub fn default_subcategory(category: &str) -> &'static str {
    subcategories(category)
        .last()
        .copied()
        .unwrap_or(FALLBACK_SUBCATEGORY)
}

pub fn income_categories() -> impl Iterator<Item = &'static str> {
    INCOME_CATEGORIES.iter().copied()
}

pub fn income_category(index: usize) -> Option<&'static str> {
    INCOME_CATEGORIES.get(index).copied()
}

pub fn expense_alias(word: &str) -> Option<&'static str> {
    lookup(EXPENSE_ALIASES, word)
}

pub fn income_alias(word: &str) -> Option<&'static str> {
    lookup(INCOME_ALIASES, word)
}

pub fn alias_subcategory(word: &str) -> Option<&'static str> {
    lookup(EXPENSE_SUBCATEGORY_ALIASES, word)
}

/// Whether `word` is any expense or income keyword.
pub fn is_alias(word: &str) -> bool {
    expense_alias(word).is_some() || income_alias(word).is_some()
}

pub fn expense_alias_keys() -> impl Iterator<Item = &'static str> {
    EXPENSE_ALIASES.iter().map(|(key, _)| *key)
}

pub fn income_alias_keys() -> impl Iterator<Item = &'static str> {
    INCOME_ALIASES.iter().map(|(key, _)| *key)
}

fn lookup(table: &'static [(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, value)| *value)
}
