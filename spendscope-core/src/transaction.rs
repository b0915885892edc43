use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Normalized output of statement ingestion (source-agnostic).
///
/// `amount` is always non-negative: credits and refunds are dropped during
/// normalization, never carried through as negatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub date: NaiveDate,
    /// Money spent, in the account currency.
    pub amount: f64,
    pub description: Option<String>,
    pub category: String,
}

impl CanonicalTransaction {
    /// Calendar month label of `date`.
    ///
    /// Derived on demand so it can never drift out of sync with the date.
    pub fn month(&self) -> &'static str {
        month_name(self.date)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full month name of a date ("January" .. "December").
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// Calendar position (1-12) of a month label, for ordering month lists.
pub fn month_number(label: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(label))
        .map(|i| i as u32 + 1)
}
