//! MODFLOW 6 time-series files, as written by `lr2series`.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::bridge::Mf6Method;
use crate::error::IoError;

/// A parsed MF6 time-series file.
#[derive(Debug, Clone, PartialEq)]
pub struct Mf6TimeSeries {
    names: Vec<String>,
    methods: Vec<Mf6Method>,
    times: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl Mf6TimeSeries {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Interpolation method per series, aligned with [`names`](Self::names).
    pub fn methods(&self) -> &[Mf6Method] {
        &self.methods
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Values of the named series, one per time.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let idx = self.names.iter().position(|n| n.eq_ignore_ascii_case(name))?;
        Some(&self.values[idx])
    }
}

/// Reads an MF6 time-series file.
///
/// Lines starting with `#` or `!` and blank lines are ignored. `METHOD`
/// applies one method to every series; `METHODS` lists one per series.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Read`] on any other read failure.
/// - [`IoError::MalformedTimeSeries`] for a missing block, a method count
///   that does not match the names, or a malformed row.
pub fn read_mf6_time_series(path: &Path) -> Result<Mf6TimeSeries, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ts = parse_mf6(&text).map_err(|reason| IoError::MalformedTimeSeries {
        path: path.to_path_buf(),
        reason,
    })?;
    info!(
        path = %path.display(),
        n_series = ts.names.len(),
        n_times = ts.times.len(),
        "MF6 time series read"
    );
    Ok(ts)
}

#[derive(Clone, Copy, PartialEq)]
enum Block {
    None,
    Attributes,
    TimeSeries,
}

fn parse_mf6(text: &str) -> Result<Mf6TimeSeries, String> {
    let mut block = Block::None;
    let mut saw_series = false;
    let mut names: Vec<String> = Vec::new();
    let mut methods: Vec<Mf6Method> = Vec::new();
    let mut single_method: Option<Mf6Method> = None;
    let mut times = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else { continue };
        let key = first.to_ascii_uppercase();

        match (block, key.as_str()) {
            (Block::None, "BEGIN") => {
                let what = tokens.next().unwrap_or_default().to_ascii_uppercase();
                block = match what.as_str() {
                    "ATTRIBUTES" => Block::Attributes,
                    "TIMESERIES" => {
                        saw_series = true;
                        Block::TimeSeries
                    }
                    other => return Err(format!("line {}: unknown block '{other}'", i + 1)),
                };
            }
            (Block::None, _) => {
                return Err(format!("line {}: '{first}' outside any block", i + 1));
            }
            (_, "END") => block = Block::None,
            (Block::Attributes, "NAMES" | "NAME") => {
                names.extend(tokens.map(str::to_string));
            }
            (Block::Attributes, "METHODS") => {
                for t in tokens {
                    methods.push(t.parse().map_err(|e| format!("line {}: {e}", i + 1))?);
                }
            }
            (Block::Attributes, "METHOD") => {
                let t = tokens.next().unwrap_or_default();
                single_method = Some(t.parse().map_err(|e| format!("line {}: {e}", i + 1))?);
            }
            (Block::Attributes, _) => {}
            (Block::TimeSeries, _) => {
                let mut values = line
                    .split_whitespace()
                    .map(|c| {
                        c.parse::<f64>()
                            .map_err(|_| format!("line {}: '{c}' is not a number", i + 1))
                    })
                    .collect::<Result<Vec<f64>, String>>()?;
                let time = values.remove(0);
                times.push(time);
                rows.push(values);
            }
        }
    }

    if block != Block::None {
        return Err("unterminated block".to_string());
    }
    if names.is_empty() {
        return Err("no series names in ATTRIBUTES block".to_string());
    }
    if !saw_series {
        return Err("no TIMESERIES block".to_string());
    }
    let methods = match (single_method, methods.is_empty()) {
        (Some(m), true) => vec![m; names.len()],
        (None, true) => vec![Mf6Method::default(); names.len()],
        (_, false) if methods.len() == names.len() => methods,
        (_, false) => {
            return Err(format!(
                "{} methods for {} names",
                methods.len(),
                names.len()
            ));
        }
    };

    let mut values = vec![Vec::with_capacity(rows.len()); names.len()];
    for (r, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(format!(
                "row {} has {} values for {} series",
                r + 1,
                row.len(),
                names.len()
            ));
        }
        for (col, v) in values.iter_mut().zip(row) {
            col.push(*v);
        }
    }

    Ok(Mf6TimeSeries {
        names,
        methods,
        times,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# written by lr2series
BEGIN ATTRIBUTES
  NAMES rch_a ro_a
  METHODS linearend stepwise
END ATTRIBUTES

BEGIN TIMESERIES
  0.0    0.0    0.0
  31.0   1.5e-3 0.2
  59.0   2.0e-3 0.1
END TIMESERIES
";

    #[test]
    fn parses_attributes_and_rows() {
        let ts = parse_mf6(SAMPLE).unwrap();
        assert_eq!(ts.names(), &["rch_a", "ro_a"]);
        assert_eq!(ts.methods(), &[Mf6Method::LinearEnd, Mf6Method::Stepwise]);
        assert_eq!(ts.times(), &[0.0, 31.0, 59.0]);
        assert_eq!(ts.column("RO_A"), Some(&[0.0, 0.2, 0.1][..]));
        assert_eq!(ts.column("x"), None);
    }

    #[test]
    fn single_method_applies_to_all() {
        let text = "BEGIN ATTRIBUTES\nNAMES a b\nMETHOD linear\nEND ATTRIBUTES\nBEGIN TIMESERIES\n1 2 3\nEND TIMESERIES\n";
        let ts = parse_mf6(text).unwrap();
        assert_eq!(ts.methods(), &[Mf6Method::Linear, Mf6Method::Linear]);
    }

    #[test]
    fn method_count_mismatch() {
        let text = "BEGIN ATTRIBUTES\nNAMES a b\nMETHODS linear\nEND ATTRIBUTES\nBEGIN TIMESERIES\nEND TIMESERIES\n";
        assert!(parse_mf6(text).unwrap_err().contains("1 methods for 2 names"));
    }

    #[test]
    fn ragged_row() {
        let text = "BEGIN ATTRIBUTES\nNAMES a b\nEND ATTRIBUTES\nBEGIN TIMESERIES\n1 2\nEND TIMESERIES\n";
        assert!(parse_mf6(text).is_err());
    }

    #[test]
    fn missing_series_block() {
        let text = "BEGIN ATTRIBUTES\nNAMES a\nEND ATTRIBUTES\n";
        assert_eq!(parse_mf6(text).unwrap_err(), "no TIMESERIES block");
    }

    #[test]
    fn unterminated() {
        let text = "BEGIN ATTRIBUTES\nNAMES a\n";
        assert_eq!(parse_mf6(text).unwrap_err(), "unterminated block");
    }
}
