//! spendscope-core: canonical transaction model, per-source ingestion
//! policies, batch aggregation, and chart-data views for the spending
//! dashboard.

pub mod transaction;
pub mod source;
pub mod aggregate;
pub mod dashboard;
pub mod export;

pub use transaction::{CanonicalTransaction, month_name, month_number};
pub use source::{
    CategoryRange, DateRangeFallback, ResolvedSource, SignConvention, SourceConfig,
    SourceRegistry, SourceSpec,
};
pub use aggregate::{AggregatedView, LedgerEntry};
pub use dashboard::{CategoryChart, CategorySelection, MonthView, SeriesPoint, month_view};
