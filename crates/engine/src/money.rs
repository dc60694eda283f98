use std::fmt;

use crate::EngineError;

/// Signed money amount represented as **integer kopecks**.
///
/// The ledger speaks JSON floats in roubles; everything inside the bot keeps
/// amounts as kopecks to avoid floating-point drift while formatting.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(150_000);
/// assert_eq!(amount.cents(), 150_000);
/// assert_eq!(amount.to_string(), "1 500.00 ₽");
/// assert_eq!(amount.format_whole(), "1 500 ₽");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer kopecks.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in kopecks.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Builds an amount from a value in roubles, rounding to the nearest kopeck.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount(format!("{value} is out of range")));
        }
        Ok(Self(cents as i64))
    }

    /// Value in roubles, as the ledger expects it on the wire.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole roubles with grouped thousands, e.g. `1 500 ₽`.
    ///
    /// Half a rouble rounds away from zero.
    #[must_use]
    pub fn format_whole(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let roubles = (self.0.unsigned_abs() + 50) / 100;
        format!("{sign}{} ₽", group_thousands(roubles))
    }

    /// Grouped amount with kopecks and no currency sign, e.g. `1 500.00`.
    #[must_use]
    pub fn format_number(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", group_thousands(abs / 100), abs % 100)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.format_number())
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

/// Groups digits by three with a plain space: `1234567` -> `1 234 567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
