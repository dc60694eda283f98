//! One-line entry parser.
//!
//! Accepts messages such as `продукты 1500`, `1500 продукты`,
//! `кафе 800 обед с другом` or `муж 50000` and turns them into a draft
//! ready to be confirmed, or into a short list of suggestions when the
//! category keyword is only close to a known one.

use std::sync::LazyLock;

use regex::Regex;

use crate::{EngineError, EntryKind, MoneyCents, catalog, parse_amount, similarity};

// Literal pattern, covered by `amount_pattern_compiles`.
#[allow(clippy::expect_used)]
static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d{1,2})?(?:к|k)?").expect("amount regex"));

/// Currency filler words that never name a category.
const FILLER_WORDS: &[&str] = &["рублей", "руб", "рубля", "рублик", "рубликов", "р", "р.", "₽"];

const MAX_CANDIDATES: usize = 3;
const MAX_SUGGESTIONS_PER_KIND: usize = 2;
const CUTOFF: f64 = 0.6;

/// A fully resolved entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub kind: EntryKind,
    pub amount: MoneyCents,
    pub category: String,
    /// Empty for incomes.
    pub subcategory: String,
    pub comment: String,
}

/// A category the user probably meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub kind: EntryKind,
    pub category: &'static str,
    pub subcategory: &'static str,
}

impl Suggestion {
    fn expense(category: &'static str) -> Self {
        Self {
            kind: EntryKind::Expense,
            category,
            subcategory: catalog::default_subcategory(category),
        }
    }

    fn income(category: &'static str) -> Self {
        Self {
            kind: EntryKind::Income,
            category,
            subcategory: "",
        }
    }

    /// Completes a draft with the amount and comment already parsed.
    pub fn into_draft(self, amount: MoneyCents, comment: String) -> Draft {
        Draft {
            kind: self.kind,
            amount,
            category: self.category.to_string(),
            subcategory: self.subcategory.to_string(),
            comment,
        }
    }
}

/// Entry whose category keyword matched nothing exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clarification {
    pub amount: MoneyCents,
    pub keyword: String,
    pub comment: String,
    /// Expense suggestions first, then income ones.
    pub suggestions: Vec<Suggestion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuickParse {
    Ready(Draft),
    NeedsClarification(Clarification),
}

/// Parses a one-line entry.
///
/// The first number is the amount; the first remaining word is the category
/// keyword; everything else, minus other category keywords, is the comment.
/// Income keywords are checked before expense keywords (`подарок` is an
/// income).
pub fn parse_quick(text: &str) -> Result<QuickParse, EngineError> {
    let text = text.trim().to_lowercase();

    let found = AMOUNT.find(&text).ok_or(EngineError::MissingAmount)?;
    let amount = parse_amount(found.as_str())?;
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount("amount must be positive".to_string()));
    }

    let rest = format!("{}{}", &text[..found.start()], &text[found.end()..]);
    let words: Vec<&str> = rest
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect();

    let Some((keyword, tail)) = words.split_first() else {
        return Err(EngineError::MissingCategory);
    };
    let comment = tail
        .iter()
        .filter(|word| !catalog::is_alias(word))
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(category) = catalog::income_alias(keyword) {
        return Ok(QuickParse::Ready(Draft {
            kind: EntryKind::Income,
            amount,
            category: category.to_string(),
            subcategory: String::new(),
            comment,
        }));
    }

    if let Some(category) = catalog::expense_alias(keyword) {
        let subcategory = catalog::alias_subcategory(keyword)
            .unwrap_or_else(|| catalog::default_subcategory(category));
        return Ok(QuickParse::Ready(Draft {
            kind: EntryKind::Expense,
            amount,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            comment,
        }));
    }

    let suggestions = suggest(keyword);
    if suggestions.is_empty() {
        return Err(EngineError::UnknownCategory(keyword.to_string()));
    }

    Ok(QuickParse::NeedsClarification(Clarification {
        amount,
        keyword: keyword.to_string(),
        comment,
        suggestions,
    }))
}

fn suggest(keyword: &str) -> Vec<Suggestion> {
    let expense = similarity::close_matches(
        keyword,
        catalog::expense_alias_keys(),
        MAX_CANDIDATES,
        CUTOFF,
    );
    let income = similarity::close_matches(
        keyword,
        catalog::income_alias_keys(),
        MAX_CANDIDATES,
        CUTOFF,
    );

    let expense = expense
        .into_iter()
        .take(MAX_SUGGESTIONS_PER_KIND)
        .filter_map(catalog::expense_alias)
        .map(Suggestion::expense);
    let income = income
        .into_iter()
        .take(MAX_SUGGESTIONS_PER_KIND)
        .filter_map(catalog::income_alias)
        .map(Suggestion::income);

    let mut suggestions: Vec<Suggestion> = Vec::new();
    for suggestion in expense.chain(income) {
        if !suggestions
            .iter()
            .any(|s| s.kind == suggestion.kind && s.category == suggestion.category)
        {
            suggestions.push(suggestion);
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_pattern_compiles() {
        assert_eq!(AMOUNT.find("кафе 1500").map(|m| m.as_str()), Some("1500"));
        assert_eq!(AMOUNT.find("250,50к").map(|m| m.as_str()), Some("250,50к"));
    }

    fn ready(text: &str) -> Draft {
        match parse_quick(text).unwrap() {
            QuickParse::Ready(draft) => draft,
            other => panic!("expected ready draft, got {other:?}"),
        }
    }

    #[test]
    fn category_then_amount() {
        let draft = ready("продукты 1500");
        assert_eq!(draft.kind, EntryKind::Expense);
        assert_eq!(draft.amount, MoneyCents::new(150_000));
        assert_eq!(draft.category, "Повседневные расходы");
        assert_eq!(draft.subcategory, "Продукты");
        assert_eq!(draft.comment, "");
    }

    #[test]
    fn amount_then_category() {
        let draft = ready("1500 Продукты");
        assert_eq!(draft.category, "Повседневные расходы");
        assert_eq!(draft.amount, MoneyCents::new(150_000));
    }

    #[test]
    fn trailing_words_become_comment() {
        let draft = ready("кафе 800 обед с другом");
        assert_eq!(draft.subcategory, "Рестораны и кафе");
        assert_eq!(draft.comment, "обед с другом");
    }

    #[test]
    fn alias_words_are_dropped_from_comment() {
        let draft = ready("такси 300 метро закрыто");
        assert_eq!(draft.comment, "закрыто");
    }

    #[test]
    fn filler_words_are_ignored() {
        let draft = ready("1500 рублей продукты");
        assert_eq!(draft.category, "Повседневные расходы");
        assert_eq!(draft.comment, "");
    }

    #[test]
    fn income_alias_wins_over_expense_alias() {
        let draft = ready("подарок 5000");
        assert_eq!(draft.kind, EntryKind::Income);
        assert_eq!(draft.category, "Подарки");
        assert_eq!(draft.subcategory, "");
    }

    #[test]
    fn expense_without_sub_alias_uses_last_subcategory() {
        let draft = ready("дети 700");
        assert_eq!(draft.subcategory, "Другое");
    }

    #[test]
    fn thousand_suffix_and_decimals() {
        assert_eq!(ready("муж 50к").amount, MoneyCents::new(5_000_000));
        assert_eq!(ready("кафе 350,50").amount, MoneyCents::new(35_050));
    }

    #[test]
    fn typo_yields_suggestions() {
        let QuickParse::NeedsClarification(clarification) = parse_quick("прдукты 1500").unwrap()
        else {
            panic!("expected suggestions");
        };
        assert_eq!(clarification.keyword, "прдукты");
        assert_eq!(clarification.amount, MoneyCents::new(150_000));
        let first = clarification.suggestions[0];
        assert_eq!(first.kind, EntryKind::Expense);
        assert_eq!(first.category, "Повседневные расходы");
        assert_eq!(first.subcategory, "Другое");
    }

    #[test]
    fn suggestions_are_deduplicated() {
        let QuickParse::NeedsClarification(clarification) = parse_quick("подарк 100").unwrap()
        else {
            panic!("expected suggestions");
        };
        let expense_gifts = clarification
            .suggestions
            .iter()
            .filter(|s| s.kind == EntryKind::Expense && s.category == "Подарки")
            .count();
        assert_eq!(expense_gifts, 1);
        assert!(
            clarification
                .suggestions
                .iter()
                .any(|s| s.kind == EntryKind::Income && s.category == "Подарки")
        );
    }

    #[test]
    fn errors() {
        assert_eq!(parse_quick("продукты"), Err(EngineError::MissingAmount));
        assert_eq!(parse_quick("1500"), Err(EngineError::MissingCategory));
        assert_eq!(parse_quick("1500 руб"), Err(EngineError::MissingCategory));
        assert!(matches!(parse_quick("0 кафе"), Err(EngineError::InvalidAmount(_))));
        assert_eq!(
            parse_quick("zzzz 100"),
            Err(EngineError::UnknownCategory("zzzz".to_string()))
        );
    }
}
