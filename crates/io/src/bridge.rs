//! `lr2series` input files, which convert LUMPREM output into MODFLOW 6
//! time-series files.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use lumpr_model::fmt_float;
use tracing::info;

use crate::error::IoError;
use crate::validate::{ValidationCollector, check_token};

/// MODFLOW 6 interpolation method of a time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mf6Method {
    Stepwise,
    Linear,
    #[default]
    LinearEnd,
}

impl Mf6Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Mf6Method::Stepwise => "stepwise",
            Mf6Method::Linear => "linear",
            Mf6Method::LinearEnd => "linearend",
        }
    }
}

impl fmt::Display for Mf6Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mf6Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stepwise" => Ok(Mf6Method::Stepwise),
            "linear" => Ok(Mf6Method::Linear),
            "linearend" => Ok(Mf6Method::LinearEnd),
            other => Err(format!(
                "unknown MF6 method '{other}' (expected stepwise, linear or linearend)"
            )),
        }
    }
}

/// One column taken from a LUMPREM output file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadColumn {
    /// Name the series is known by in write blocks.
    pub my_name: String,
    /// Column header in the LUMPREM output file.
    pub lumprem_name: String,
    /// Divide values by the output interval length.
    pub divide_by_delta_t: bool,
}

/// One MF6 series to write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSeries {
    pub name: String,
    pub scale: f64,
    pub offset: f64,
    pub method: Mf6Method,
}

#[derive(Debug, Clone, PartialEq)]
struct ReadBlock {
    output_file: String,
    columns: Vec<ReadColumn>,
}

#[derive(Debug, Clone, PartialEq)]
struct WriteBlock {
    ts_file: String,
    series: Vec<WriteSeries>,
}

/// An `lr2series` input file under construction.
///
/// # Example
///
/// ```
/// use lumpr_io::{BridgeFile, Mf6Method, ReadColumn, WriteSeries};
///
/// let bridge = BridgeFile::new()
///     .with_read(
///         "lr_lr1.out",
///         vec![ReadColumn {
///             my_name: "rch1".into(),
///             lumprem_name: "recharge".into(),
///             divide_by_delta_t: true,
///         }],
///     )
///     .with_write(
///         "rch.ts",
///         vec![WriteSeries {
///             name: "rch1".into(),
///             scale: 1.0,
///             offset: 0.0,
///             method: Mf6Method::LinearEnd,
///         }],
///     );
/// assert!(bridge.validate().is_ok());
/// assert!(bridge.render().starts_with("READ_LUMPREM_OUTPUT_FILE lr_lr1.out 1\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeFile {
    reads: Vec<ReadBlock>,
    writes: Vec<WriteBlock>,
}

impl BridgeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `READ_LUMPREM_OUTPUT_FILE` block.
    pub fn with_read(mut self, output_file: impl Into<String>, columns: Vec<ReadColumn>) -> Self {
        self.reads.push(ReadBlock {
            output_file: output_file.into(),
            columns,
        });
        self
    }

    /// Adds a `WRITE_MF6_TIME_SERIES_FILE` block.
    pub fn with_write(mut self, ts_file: impl Into<String>, series: Vec<WriteSeries>) -> Self {
        self.writes.push(WriteBlock {
            ts_file: ts_file.into(),
            series,
        });
        self
    }

    /// Checks names and cross-references between blocks.
    ///
    /// Every series written must have been read under the same name, each
    /// name may be read only once, and every name must be a single token.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        let mut read_names = HashSet::new();

        for block in &self.reads {
            check_token(&mut c, "output file", &block.output_file);
            if block.columns.is_empty() {
                c.push(format!("read block '{}' has no columns", block.output_file));
            }
            for col in &block.columns {
                check_token(&mut c, "series name", &col.my_name);
                check_token(&mut c, "LUMPREM column", &col.lumprem_name);
                if !read_names.insert(col.my_name.as_str()) {
                    c.push(format!("series '{}' read more than once", col.my_name));
                }
            }
        }
        for block in &self.writes {
            check_token(&mut c, "time-series file", &block.ts_file);
            if block.series.is_empty() {
                c.push(format!("write block '{}' has no series", block.ts_file));
            }
            for s in &block.series {
                if !read_names.contains(s.name.as_str()) {
                    c.push(format!("series '{}' written but never read", s.name));
                }
                if !s.scale.is_finite() || !s.offset.is_finite() {
                    c.push(format!("series '{}' has non-finite scale or offset", s.name));
                }
            }
        }
        c.finish()
    }

    /// Renders the file text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.reads {
            out.push_str(&format!(
                "READ_LUMPREM_OUTPUT_FILE {} {}\n",
                block.output_file,
                block.columns.len()
            ));
            out.push_str("#  my_name       LUMPREM_name    divide_by_delta_t?\n\n");
            for col in &block.columns {
                let flag = if col.divide_by_delta_t { "yes" } else { "no" };
                out.push_str(&format!(
                    "\t{:<16}{:<16}{flag}\n",
                    col.my_name, col.lumprem_name
                ));
            }
            out.push('\n');
        }
        out.push_str("# Begin writing MF6 time series\n\n");
        for block in &self.writes {
            out.push_str(&format!(
                "WRITE_MF6_TIME_SERIES_FILE {} {}\n",
                block.ts_file,
                block.series.len()
            ));
            out.push_str("#  ts_name       scale       offset      mf6_method\n\n");
            for s in &block.series {
                out.push_str(&format!(
                    "\t{:<16}{:<12}{:<12}{}\n",
                    s.name,
                    fmt_float(s.scale),
                    fmt_float(s.offset),
                    s.method
                ));
            }
            out.push('\n');
        }
        out
    }

    /// Validates and writes the file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] or [`IoError::Write`].
    pub fn write(&self, path: &Path) -> Result<(), IoError> {
        self.validate()?;
        let write_err = |source| IoError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.render()).map_err(write_err)?;
        info!(
            path = %path.display(),
            n_read = self.reads.len(),
            n_write = self.writes.len(),
            "lr2series input written"
        );
        Ok(())
    }
}
