/// Raw tabular form of one statement file: headers plus string cells,
/// exactly as read. No schema is assumed; the normalizer interprets columns
/// by name. Consumed immediately after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Index of a column by header name. Source exports disagree on header
    /// casing, so the lookup is case-insensitive.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Trimmed cell value, `None` when the cell is absent or blank.
    pub fn value<'a>(&self, row: &'a [String], column: usize) -> Option<&'a str> {
        row.get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
