//! Batch aggregation: concatenate per-file tables, sort, running totals,
//! grouped summaries.
//!
//! The view is rebuilt from scratch on every run; there is no incremental
//! update path and nothing here survives the process.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::transaction::{CanonicalTransaction, month_number};

/// One row of the sorted ledger with its within-month running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub transaction: CanonicalTransaction,
    /// Cumulative spend within this entry's month partition, in date order.
    pub running_total: f64,
}

/// Derived view over all normalized statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedView {
    /// Full canonical table, stably sorted ascending by date.
    pub entries: Vec<LedgerEntry>,
    pub category_totals: BTreeMap<String, f64>,
    pub month_totals: BTreeMap<String, f64>,
}

impl AggregatedView {
    /// Fold per-file transaction tables into the single aggregated view.
    ///
    /// Running totals partition by month label, so January of one year and
    /// January of the next share a partition. Empty input yields an empty
    /// view, not an error.
    pub fn build(batches: Vec<Vec<CanonicalTransaction>>) -> Self {
        let mut transactions: Vec<CanonicalTransaction> =
            batches.into_iter().flatten().collect();
        // sort_by_key is stable: equal dates keep their input order.
        transactions.sort_by_key(|t| t.date);

        let mut entries = Vec::with_capacity(transactions.len());
        let mut partition_running: BTreeMap<&'static str, f64> = BTreeMap::new();
        let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
        let mut month_totals: BTreeMap<String, f64> = BTreeMap::new();

        for transaction in transactions {
            let month = transaction.month();
            let running = partition_running.entry(month).or_insert(0.0);
            *running += transaction.amount;
            *category_totals
                .entry(transaction.category.clone())
                .or_insert(0.0) += transaction.amount;
            *month_totals.entry(month.to_string()).or_insert(0.0) += transaction.amount;
            entries.push(LedgerEntry {
                running_total: *running,
                transaction,
            });
        }

        Self {
            entries,
            category_totals,
            month_totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_spend(&self) -> f64 {
        self.entries.iter().map(|e| e.transaction.amount).sum()
    }

    /// Month labels present in the data, in calendar order.
    pub fn months(&self) -> Vec<String> {
        let mut months: Vec<String> = self.month_totals.keys().cloned().collect();
        months.sort_by_key(|m| month_number(m).unwrap_or(u32::MAX));
        months
    }

    /// Category labels present in the data, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.category_totals.keys().cloned().collect()
    }
}
