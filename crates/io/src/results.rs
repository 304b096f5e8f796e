//! LUMPREM output tables.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::IoError;

/// Number of trailing non-data lines LUMPREM writes after the table.
pub const DEFAULT_FOOTER_LINES: usize = 2;

/// How to read a results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsConfig {
    footer_lines: usize,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            footer_lines: DEFAULT_FOOTER_LINES,
        }
    }
}

impl ResultsConfig {
    /// Sets how many trailing non-blank lines are not data.
    pub fn with_footer_lines(mut self, n: usize) -> Self {
        self.footer_lines = n;
        self
    }

    pub fn footer_lines(&self) -> usize {
        self.footer_lines
    }
}

/// A parsed results table: named columns over numeric rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ResultTable {
    /// Creates a table; every row must be as wide as `columns`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<f64>>) {
        (self.columns, self.rows)
    }
}

/// Reads a whitespace-delimited LUMPREM results file.
///
/// Blank lines are ignored. The first remaining line is the header; the
/// last `footer_lines` lines are discarded; everything in between must be
/// numeric rows as wide as the header.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Read`] on any other read failure.
/// - [`IoError::EmptyFile`] if there is no header.
/// - [`IoError::Parse`] for a non-numeric cell.
/// - [`IoError::RowShape`] for a row of the wrong width.
pub fn read_results(path: &Path, config: &ResultsConfig) -> Result<ResultTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_results(path, &text, config)?;
    info!(
        path = %path.display(),
        n_rows = table.n_rows(),
        n_columns = table.columns().len(),
        "results read"
    );
    Ok(table)
}

fn parse_results(path: &Path, text: &str, config: &ResultsConfig) -> Result<ResultTable, IoError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
        .collect();

    let Some((&(_, header), body)) = lines.split_first() else {
        return Err(IoError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();
    let data = &body[..body.len().saturating_sub(config.footer_lines)];
    debug!(
        skipped = body.len() - data.len(),
        "footer lines dropped"
    );

    let mut rows = Vec::with_capacity(data.len());
    for &(line, text) in data {
        let row = text
            .split_whitespace()
            .map(|cell| {
                cell.parse::<f64>().map_err(|e| IoError::Parse {
                    path: path.to_path_buf(),
                    line,
                    reason: format!("'{cell}' is not a number: {e}"),
                })
            })
            .collect::<Result<Vec<f64>, IoError>>()?;
        if row.len() != columns.len() {
            return Err(IoError::RowShape {
                path: path.to_path_buf(),
                line,
                expected: columns.len(),
                got: row.len(),
            });
        }
        rows.push(row);
    }
    Ok(ResultTable::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
   days   vol   recharge
   1      0.25  0.001
   2      0.24  0.0015

   3      0.23  0.002
 end of output
 run completed ok
";

    fn parse(text: &str, footer: usize) -> Result<ResultTable, IoError> {
        parse_results(
            Path::new("lr_t.out"),
            text,
            &ResultsConfig::default().with_footer_lines(footer),
        )
    }

    #[test]
    fn default_footer_skipped() {
        let table = parse(SAMPLE, 2).unwrap();
        assert_eq!(table.columns(), &["days", "vol", "recharge"]);
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column("recharge"), Some(vec![0.001, 0.0015, 0.002]));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn footer_count_configurable() {
        let text = "a b\n1 2\n3 4\nsummary\n";
        let table = parse(text, 1).unwrap();
        assert_eq!(table.rows(), &[vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn footer_larger_than_body() {
        let table = parse("a b\n1 2\n", 5).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn non_numeric_cell_reports_line() {
        let err = parse("a b\n1 2\n3 x\n", 0).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 3, .. }));
    }

    #[test]
    fn footer_left_in_is_parse_error() {
        let err = parse(SAMPLE, 0).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 6, .. }));
    }

    #[test]
    fn ragged_row() {
        let err = parse("a b c\n1 2\n", 0).unwrap_err();
        assert!(matches!(
            err,
            IoError::RowShape {
                line: 2,
                expected: 3,
                got: 2,
                ..
            }
        ));
    }

    #[test]
    fn empty_file() {
        assert!(matches!(parse("\n\n", 2), Err(IoError::EmptyFile { .. })));
    }

    #[test]
    fn defaults() {
        assert_eq!(ResultsConfig::default().footer_lines(), DEFAULT_FOOTER_LINES);
    }
}
