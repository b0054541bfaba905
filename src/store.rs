// src/store.rs
//
// String-level table holder for the capitals CSV, plus the typed bridge
// into `anomaly::Observation`. Parsing stays permissive cell-by-cell:
// a bad month or value cell becomes a missing observation and never a
// load failure. Missing columns are the caller's error (InvalidVariable).

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::anomaly::{Observation, ScoreError};
use crate::core::csv::{self, Delim};
use crate::core::date;

/// Headers + rows, all strings, in file order.
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    /// Parse delimited text. The first row is the header row.
    pub fn parse(text: &str, delim: Delim) -> Result<DataSet, Box<dyn Error>> {
        let rows = csv::parse_rows(text, delim);
        let (headers, rows) = csv::split_headers(rows);
        let headers = headers.ok_or("input has no header row")?;
        Ok(DataSet { headers, rows })
    }

    /// Column index by (case-insensitive) header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Cell accessor tolerant of ragged rows.
    pub fn cell<'a>(&'a self, row: usize, col: usize) -> Option<&'a str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Extract one observation per row for `variable`, keyed by the entity
    /// and month columns. Fails with `InvalidVariable` before touching any
    /// row if a requested column is absent from the header.
    pub fn observations(
        &self,
        entity_col: &str,
        month_col: &str,
        variable: &str,
    ) -> Result<Vec<Observation>, ScoreError> {
        let ec = self
            .column(entity_col)
            .ok_or_else(|| ScoreError::InvalidVariable(entity_col.to_string()))?;
        let mc = self
            .column(month_col)
            .ok_or_else(|| ScoreError::InvalidVariable(month_col.to_string()))?;
        let vc = self
            .column(variable)
            .ok_or_else(|| ScoreError::InvalidVariable(variable.to_string()))?;

        let mut out = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let entity = row.get(ec).map(|s| s.trim().to_string()).unwrap_or_default();
            match row.get(mc).and_then(|c| date::parse_month(c)) {
                Some(month) => out.push(Observation {
                    entity,
                    month,
                    value: row.get(vc).and_then(|c| parse_value(c)),
                }),
                // Unusable month cell: keep the slot so scores stay
                // positionally aligned, but it can never join a group.
                None => out.push(Observation {
                    entity,
                    month: NaiveDate::MIN,
                    value: None,
                }),
            }
        }
        Ok(out)
    }

    /// Append a derived column. Ragged rows are padded first so the new
    /// cell always lands at the same index.
    pub fn push_column(&mut self, name: &str, cells: Vec<String>) {
        let width = self.headers.len();
        self.headers.push(name.to_string());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            while row.len() < width {
                row.push(s!());
            }
            row.push(cell);
        }
    }

    /// Keep only rows whose entity column matches one of `names`
    /// (case-insensitive, trimmed).
    pub fn retain_entities(&mut self, entity_col: &str, names: &[String]) {
        let Some(ec) = self.column(entity_col) else { return };
        self.rows.retain(|row| {
            row.get(ec).is_some_and(|cell| {
                let cell = cell.trim();
                names.iter().any(|n| cell.eq_ignore_ascii_case(n.trim()))
            })
        });
    }
}

/// Numeric cell → value. Empty, non-numeric and non-finite all read as missing.
fn parse_value(cell: &str) -> Option<f64> {
    let t = cell.trim();
    if t.is_empty() { return None; }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load a dataset from disk; delimiter follows the file extension.
pub fn load_dataset(path: &Path) -> Result<DataSet, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let delim = path
        .extension()
        .and_then(|s| s.to_str())
        .map(Delim::from_ext)
        .unwrap_or(Delim::Csv);
    DataSet::parse(&text, delim)
}
