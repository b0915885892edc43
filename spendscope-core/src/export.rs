//! Optional persistence of the aggregated view. Off by default; the CLI
//! enables it per run.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::AggregatedView;
use crate::transaction::month_name;

/// CSV row shape. The Month column is materialized from the date at write
/// time, never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRow<'a> {
    date: NaiveDate,
    month: &'static str,
    amount: f64,
    description: Option<&'a str>,
    category: &'a str,
    running_total: f64,
}

/// Write the combined, sorted ledger as delimited text.
pub fn write_csv(view: &AggregatedView, writer: impl Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in &view.entries {
        let txn = &entry.transaction;
        writer.serialize(ExportRow {
            date: txn.date,
            month: month_name(txn.date),
            amount: txn.amount,
            description: txn.description.as_deref(),
            category: &txn.category,
            running_total: entry.running_total,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the whole view (ledger plus totals) as a JSON snapshot.
pub fn write_json(view: &AggregatedView, writer: impl Write) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::CanonicalTransaction;

    fn sample_view() -> AggregatedView {
        AggregatedView::build(vec![vec![
            CanonicalTransaction {
                date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                amount: 10.0,
                description: Some("HEB #609".to_string()),
                category: "Groceries".to_string(),
            },
            CanonicalTransaction {
                date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
                amount: 20.0,
                description: None,
                category: "Restaurants".to_string(),
            },
        ]])
    }

    #[test]
    fn test_csv_export_shape() {
        let mut buf = Vec::new();
        write_csv(&sample_view(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Date,Month,Amount,Description,Category,RunningTotal")
        );
        assert_eq!(lines.next(), Some("2024-07-01,July,10.0,HEB #609,Groceries,10.0"));
        assert_eq!(lines.next(), Some("2024-07-05,July,20.0,,Restaurants,30.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_json_snapshot_round_trips_totals() {
        let view = sample_view();
        let mut buf = Vec::new();
        write_json(&view, &mut buf).unwrap();
        let restored: AggregatedView = serde_json::from_slice(&buf).unwrap();
        assert_eq!(restored, view);
    }
}
