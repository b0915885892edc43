//! Statement Loader: one CSV file into a raw table, plus the batch fold
//! over a statements directory.
//!
//! Every failure is contained at the per-file boundary: it is classified,
//! logged with the file path, and the batch moves on. A failed file
//! contributes zero transactions.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::{error, info};

use spendscope_core::{CanonicalTransaction, SourceConfig, SourceRegistry};

use crate::normalize;
use crate::types::RawTable;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("statement not found: {path}")]
    NotFound { path: PathBuf },
    #[error("no data rows in {path}")]
    EmptyData { path: PathBuf },
    #[error("malformed CSV in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unexpected failure loading {path}")]
    Unexpected {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl LoadError {
    /// Stable label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound { .. } => "not-found",
            LoadError::EmptyData { .. } => "empty-data",
            LoadError::Parse { .. } => "parse-error",
            LoadError::Unexpected { .. } => "unexpected",
        }
    }
}

fn classify_csv(path: &Path, err: csv::Error) -> LoadError {
    use csv::ErrorKind;
    let path = path.to_path_buf();
    if matches!(
        err.kind(),
        ErrorKind::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound
    ) {
        return LoadError::NotFound { path };
    }
    if matches!(
        err.kind(),
        ErrorKind::Utf8 { .. } | ErrorKind::UnequalLengths { .. }
    ) {
        return LoadError::Parse { path, source: err };
    }
    LoadError::Unexpected {
        path,
        source: err.into(),
    }
}

/// Read one statement file into its raw tabular form.
pub fn load_statement(path: &Path) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| LoadError::Unexpected {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let mut reader = ReaderBuilder::new().from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| classify_csv(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| classify_csv(path, e))?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    if rows.is_empty() {
        return Err(LoadError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    Ok(RawTable::new(headers, rows))
}

/// Load one statement and normalize it under the resolved source policy.
///
/// A date the normalizer cannot parse counts as an `Unexpected` failure of
/// this file.
pub fn load_and_normalize(
    path: &Path,
    config: &SourceConfig,
) -> Result<Vec<CanonicalTransaction>, LoadError> {
    let table = load_statement(path)?;
    normalize::normalize(&table, config).map_err(|e| LoadError::Unexpected {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// All `.csv` files (case-insensitive) directly inside `dir`, sorted so
/// batches are deterministic.
pub fn discover_statements(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Outcome of one batch run: per-file transaction tables plus the recorded
/// failures.
#[derive(Debug, Default)]
pub struct Batch {
    pub statements: Vec<Vec<CanonicalTransaction>>,
    pub failures: Vec<(PathBuf, LoadError)>,
}

impl Batch {
    /// True when not a single file loaded — the caller should surface an
    /// empty result rather than render a blank dashboard silently.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.statements.iter().map(Vec::len).sum()
    }
}

/// Fold a list of statement files into per-file canonical tables.
///
/// One structured log event per file outcome. Failures never abort the
/// batch and are permanently skipped for this run.
pub fn load_batch(paths: &[PathBuf], registry: &SourceRegistry) -> Batch {
    let mut batch = Batch::default();
    for path in paths {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let source = registry.resolve(file_name);
        match load_and_normalize(path, source.config) {
            Ok(transactions) => {
                info!(
                    path = %path.display(),
                    source = source.id,
                    rows = transactions.len(),
                    "statement loaded"
                );
                batch.statements.push(transactions);
            }
            Err(err) => {
                error!(
                    path = %path.display(),
                    source = source.id,
                    kind = err.kind(),
                    error = %err,
                    "statement skipped"
                );
                batch.failures.push((path.clone(), err));
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_statement_reads_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "plain.csv",
            "Date,Amount,Category\n2024-03-01,45.00,Groceries\n",
        );
        let table = load_statement(&path).unwrap();
        assert_eq!(table.headers(), ["Date", "Amount", "Category"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_statement(&dir.path().join("absent.csv")).unwrap_err();
        assert_eq!(err.kind(), "not-found");
    }

    #[test]
    fn test_header_only_file_is_empty_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "empty.csv", "Date,Amount,Category\n");
        assert_eq!(load_statement(&path).unwrap_err().kind(), "empty-data");

        let path = write_file(dir.path(), "zero.csv", "");
        assert_eq!(load_statement(&path).unwrap_err().kind(), "empty-data");
    }

    #[test]
    fn test_ragged_rows_are_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "ragged.csv",
            "Date,Amount,Category\n2024-03-01,45.00\n",
        );
        assert_eq!(load_statement(&path).unwrap_err().kind(), "parse-error");
    }

    #[test]
    fn test_bad_date_escalates_to_unexpected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "baddate.csv",
            "Date,Amount,Category\nsoon,45.00,Groceries\n",
        );
        let err = load_and_normalize(&path, &SourceConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "unexpected");
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.csv", "x\n1\n");
        write_file(dir.path(), "a.CSV", "x\n1\n");
        write_file(dir.path(), "notes.txt", "hello\n");
        let paths = discover_statements(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(
            dir.path(),
            "good.csv",
            "Date,Amount,Category\n2024-03-01,45.00,Groceries\n",
        );
        let missing = dir.path().join("gone.csv");

        let batch = load_batch(&[missing.clone(), good], &SourceRegistry::default());
        assert_eq!(batch.statements.len(), 1);
        assert_eq!(batch.transaction_count(), 1);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].0, missing);
        assert_eq!(batch.failures[0].1.kind(), "not-found");
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_all_failures_is_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let batch = load_batch(
            &[dir.path().join("gone.csv")],
            &SourceRegistry::default(),
        );
        assert!(batch.is_empty());
        assert_eq!(batch.transaction_count(), 0);
    }
}
