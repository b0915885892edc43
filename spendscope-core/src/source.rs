//! Per-source ingestion policy: sign convention and category backfill.
//!
//! Each statement source is described by an explicit, serializable config
//! resolved once per file at ingestion time. File names are matched against
//! configured patterns; nothing in the pipeline special-cases a bank name.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Whether a source records outgoing money as positive or negative values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignConvention {
    /// Spending is recorded as positive amounts.
    #[default]
    Normal,
    /// Spending is recorded as negative amounts. The whole amount column is
    /// negated before any row filtering.
    Inverted,
}

/// One backfill rule: dates strictly after `after` and on or before `until`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub after: NaiveDate,
    pub until: NaiveDate,
    pub category: String,
}

/// Fallback categorization for sources with no native category column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeFallback {
    /// Label assigned when no range matches.
    pub default: String,
    #[serde(default)]
    pub ranges: Vec<CategoryRange>,
}

impl DateRangeFallback {
    pub fn category_for(&self, date: NaiveDate) -> &str {
        self.ranges
            .iter()
            .find(|r| date > r.after && date <= r.until)
            .map(|r| r.category.as_str())
            .unwrap_or(&self.default)
    }

    /// The historical placeholder policy: everything is "Groceries" except a
    /// Q3-2024 window of "Restaurants". Valid for one quarter of one account;
    /// ships only as an overridable default, not a domain rule.
    pub fn placeholder() -> Self {
        Self {
            default: "Groceries".to_string(),
            ranges: vec![CategoryRange {
                after: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                until: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
                category: "Restaurants".to_string(),
            }],
        }
    }
}

/// Ingestion policy for one statement source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub sign_convention: SignConvention,
    /// `None` means the source ships its own category column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_fallback: Option<DateRangeFallback>,
}

/// A named source plus the file-name pattern that selects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub id: String,
    /// Regex matched against the statement file name (not the full path).
    pub filename_pattern: String,
    #[serde(flatten)]
    pub config: SourceConfig,
}

/// Result of resolving a file name against the registry.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSource<'a> {
    pub id: &'a str,
    pub config: &'a SourceConfig,
}

/// Ordered source registry; first matching pattern wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRegistry {
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    /// Applied when no pattern matches.
    #[serde(default)]
    pub default: SourceConfig,
}

impl SourceRegistry {
    pub fn resolve(&self, file_name: &str) -> ResolvedSource<'_> {
        for spec in &self.sources {
            let matched = Regex::new(&spec.filename_pattern)
                .map(|re| re.is_match(file_name))
                .unwrap_or(false);
            if matched {
                return ResolvedSource {
                    id: &spec.id,
                    config: &spec.config,
                };
            }
        }
        ResolvedSource {
            id: "default",
            config: &self.default,
        }
    }

    /// Compile every pattern so a bad config fails at load time, not
    /// mid-batch.
    pub fn validate(&self) -> Result<(), regex::Error> {
        for spec in &self.sources {
            Regex::new(&spec.filename_pattern)?;
        }
        Ok(())
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceSpec {
                    id: "chase-credit".to_string(),
                    filename_pattern: "(?i)chase".to_string(),
                    config: SourceConfig {
                        sign_convention: SignConvention::Inverted,
                        category_fallback: None,
                    },
                },
                SourceSpec {
                    id: "citi-card".to_string(),
                    filename_pattern: "(?i)citi".to_string(),
                    config: SourceConfig {
                        sign_convention: SignConvention::Normal,
                        category_fallback: Some(DateRangeFallback::placeholder()),
                    },
                },
            ],
            default: SourceConfig::default(),
        }
    }
}
