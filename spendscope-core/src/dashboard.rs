//! Chart data for the presentation layer.
//!
//! The dashboard binds two dropdowns (month, category) to two charts. Both
//! chart payloads come from [`month_view`], a pure function of the
//! aggregated view plus the two selections, so the presentation layer can
//! be exercised in tests without a UI runtime.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedView;

/// Category dropdown selection. `All` is the "All Categories" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySelection {
    All,
    One(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Payload of the second chart: bars when all categories are selected,
/// a cumulative series when a single category is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CategoryChart {
    Breakdown(Vec<(String, f64)>),
    Cumulative(Vec<SeriesPoint>),
}

/// Everything the dashboard renders for one (month, category) selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthView {
    pub month: String,
    /// Cumulative spend over the month, all categories.
    pub cumulative: Vec<SeriesPoint>,
    pub category: CategoryChart,
}

/// Build the chart payloads for one month and category selection.
///
/// An unknown month or category yields empty series: the dashboard renders
/// empty charts rather than failing.
pub fn month_view(
    view: &AggregatedView,
    month: &str,
    selection: &CategorySelection,
) -> MonthView {
    let in_month: Vec<_> = view
        .entries
        .iter()
        .filter(|e| e.transaction.month().eq_ignore_ascii_case(month))
        .collect();

    let cumulative = in_month
        .iter()
        .map(|e| SeriesPoint {
            date: e.transaction.date,
            value: e.running_total,
        })
        .collect();

    let category = match selection {
        CategorySelection::All => {
            let mut totals: Vec<(String, f64)> = Vec::new();
            for entry in &in_month {
                let category = entry.transaction.category.as_str();
                match totals.iter_mut().find(|(c, _)| c == category) {
                    Some((_, total)) => *total += entry.transaction.amount,
                    None => totals.push((category.to_string(), entry.transaction.amount)),
                }
            }
            totals.sort_by(|a, b| a.0.cmp(&b.0));
            CategoryChart::Breakdown(totals)
        }
        CategorySelection::One(category) => {
            let mut cumsum = 0.0;
            let points = in_month
                .iter()
                .filter(|e| &e.transaction.category == category)
                .map(|e| {
                    cumsum += e.transaction.amount;
                    SeriesPoint {
                        date: e.transaction.date,
                        value: cumsum,
                    }
                })
                .collect();
            CategoryChart::Cumulative(points)
        }
    };

    MonthView {
        month: month.to_string(),
        cumulative,
        category,
    }
}
