//! Free-text amount parsing.
//!
//! Users type amounts the way they say them: `2500`, `2 500`, `2,5к`,
//! `1.234,56`. [`parse_amount`] normalizes all of those into kopecks.

use crate::{EngineError, MoneyCents};

const THOUSAND_SUFFIXES: [char; 2] = ['к', 'k'];

/// Parses a user-typed amount.
///
/// Rules:
/// - whitespace anywhere is ignored (`2 500` == `2500`)
/// - a trailing `к`/`k` multiplies by 1000
/// - with both `,` and `.` present, the right-most one is the decimal point and
///   the others are thousands separators; a lone `,` is a decimal point
/// - any other character is dropped before reading the number
/// - negative values are rejected, zero is accepted
///
/// ```rust
/// use engine::parse_amount;
///
/// assert_eq!(parse_amount("2 500").unwrap().cents(), 250_000);
/// assert_eq!(parse_amount("2,5к").unwrap().cents(), 250_000);
/// assert!(parse_amount("много").is_err());
/// ```
pub fn parse_amount(text: &str) -> Result<MoneyCents, EngineError> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(EngineError::InvalidAmount("empty amount".to_string()));
    }

    let mut compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    let mut multiplier = 1.0;
    if let Some(last) = compact.chars().last()
        && THOUSAND_SUFFIXES.contains(&last)
    {
        multiplier = 1000.0;
        compact.pop();
    }

    let normalized = normalize_separators(&compact);
    let cleaned: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| EngineError::InvalidAmount(format!("cannot read '{}'", text.trim())))?;
    let value = value * multiplier;
    if value < 0.0 {
        return Err(EngineError::InvalidAmount("amount must not be negative".to_string()));
    }

    MoneyCents::from_major(value)
}

fn normalize_separators(input: &str) -> String {
    let last_comma = input.rfind(',');
    let last_dot = input.rfind('.');

    match (last_comma, last_dot) {
        (Some(comma), Some(dot)) => {
            let decimal = comma.max(dot);
            let strip = |part: &str| -> String {
                part.chars().filter(|c| *c != ',' && *c != '.').collect()
            };
            // Both separators are one byte wide, so `decimal + 1` is a char boundary.
            format!("{}.{}", strip(&input[..decimal]), strip(&input[decimal + 1..]))
        }
        (Some(_), None) => input.replace(',', "."),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(text: &str) -> i64 {
        parse_amount(text).unwrap().cents()
    }

    #[test]
    fn plain_and_spaced_numbers() {
        assert_eq!(cents("2500"), 250_000);
        assert_eq!(cents(" 2 500 "), 250_000);
        assert_eq!(cents("1 000 000"), 100_000_000);
    }

    #[test]
    fn thousand_suffix_latin_and_cyrillic() {
        assert_eq!(cents("2к"), 200_000);
        assert_eq!(cents("2K"), 200_000);
        assert_eq!(cents("1,5к"), 150_000);
        assert_eq!(cents("2.5 k"), 250_000);
    }

    #[test]
    fn comma_alone_is_decimal_point() {
        assert_eq!(cents("2,5"), 250);
        assert_eq!(cents("99,99"), 9999);
    }

    #[test]
    fn rightmost_separator_wins_when_both_present() {
        assert_eq!(cents("1.234,56"), 123_456);
        assert_eq!(cents("1,234.56"), 123_456);
        assert_eq!(cents("1.234.567,8"), 123_456_780);
    }

    #[test]
    fn noise_characters_are_dropped() {
        assert_eq!(cents("1500₽"), 150_000);
        assert_eq!(cents("1500 руб"), 150_000);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(cents("10.129"), 1013);
        assert_eq!(cents("0.001"), 0);
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(cents("0"), 0);
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("k").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }
}
