//! Map heterogeneous statement tables onto the canonical schema.
//!
//! Steps run in a fixed order over the whole table: date column
//! unification and parsing, per-file sign normalization, debit-column
//! unification, credit filtering, column pruning, and missing-value drops.
//! Category backfill applies only to sources with no native category
//! column, under the source's configured date-range policy.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use spendscope_core::{CanonicalTransaction, SignConvention, SourceConfig};

use crate::types::RawTable;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no date column (expected `Date` or `Post Date`)")]
    MissingDateColumn,
    #[error("no amount column (expected `Amount` or `Debit`)")]
    MissingAmountColumn,
    #[error("unparseable date {value:?} on line {line}")]
    UnparseableDate { line: usize, value: String },
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
}

fn parse_amount(value: &str) -> Option<f64> {
    value.replace(',', "").trim_start_matches('$').parse().ok()
}

/// Normalize one raw statement table under its source policy.
///
/// An unparseable (non-blank) date fails the whole file; every other
/// irregularity drops only the offending row.
pub fn normalize(
    table: &RawTable,
    config: &SourceConfig,
) -> Result<Vec<CanonicalTransaction>, NormalizeError> {
    // `Post Date` exports carry the same field under a different header.
    let date_col = table
        .column("Date")
        .or_else(|| table.column("Post Date"))
        .ok_or(NormalizeError::MissingDateColumn)?;

    // Sign inversion is a per-file decision and applies to a native Amount
    // column; Debit-style exports already record spend as positive.
    let (amount_col, invert) = match table.column("Amount") {
        Some(col) => (col, config.sign_convention == SignConvention::Inverted),
        None => (
            table
                .column("Debit")
                .ok_or(NormalizeError::MissingAmountColumn)?,
            false,
        ),
    };

    let description_col = table.column("Description");
    let category_col = table.column("Category");
    let fallback = if category_col.is_none() {
        let fallback = config.category_fallback.as_ref();
        if fallback.is_none() {
            warn!("statement has no category column and no fallback policy; all rows will drop");
        }
        fallback
    } else {
        None
    };

    let mut out = Vec::new();
    for (i, row) in table.rows().enumerate() {
        // Header occupies line 1 of the file.
        let line = i + 2;

        let date = match table.value(row, date_col) {
            // Blank date is a missing value: drop the row.
            None => continue,
            Some(raw) => parse_date(raw).ok_or_else(|| NormalizeError::UnparseableDate {
                line,
                value: raw.to_string(),
            })?,
        };

        // Unparseable amounts are treated as missing values.
        let Some(mut amount) = table.value(row, amount_col).and_then(parse_amount) else {
            continue;
        };
        if invert {
            amount = -amount;
        }
        // Credits, refunds and card payments are dropped, not tracked.
        if amount < 0.0 {
            continue;
        }

        let description = match description_col {
            Some(col) => match table.value(row, col) {
                Some(v) => Some(v.to_string()),
                // The source has the column but this row lacks a value.
                None => continue,
            },
            None => None,
        };

        let category = match category_col {
            Some(col) => match table.value(row, col) {
                Some(v) => v.to_string(),
                None => continue,
            },
            None => match fallback {
                Some(policy) => policy.category_for(date).to_string(),
                None => continue,
            },
        };

        out.push(CanonicalTransaction {
            date,
            amount,
            description,
            category,
        });
    }

    Ok(out)
}
