//! The optional `* output time series` deck section.

use chrono::NaiveDateTime;
use lumpr_model::fmt_float;

use crate::error::DeckError;

/// Format of the series start line.
pub const SERIES_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One recorded output variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDescriptor {
    pub column: String,
    pub site: String,
    pub scale: f64,
    pub offset: f64,
    pub lower: f64,
    pub upper: f64,
}

impl SeriesDescriptor {
    fn line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.column,
            self.site,
            fmt_float(self.scale),
            fmt_float(self.offset),
            fmt_float(self.lower),
            fmt_float(self.upper)
        )
    }
}

/// Column-wise descriptor lists, as they appear in a project file.
///
/// Every list must have one entry per column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesColumns {
    pub columns: Vec<String>,
    pub sites: Vec<String>,
    pub scales: Vec<f64>,
    pub offsets: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl SeriesColumns {
    /// Zips the lists into descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ShapeMismatch`] naming the first list whose
    /// length differs from the number of column names.
    pub fn into_descriptors(self) -> Result<Vec<SeriesDescriptor>, DeckError> {
        let expected = self.columns.len();
        let lens = [
            ("sites", self.sites.len()),
            ("scales", self.scales.len()),
            ("offsets", self.offsets.len()),
            ("lower", self.lower.len()),
            ("upper", self.upper.len()),
        ];
        if let Some(&(list, got)) = lens.iter().find(|(_, n)| *n != expected) {
            return Err(DeckError::ShapeMismatch {
                list,
                expected,
                got,
            });
        }

        let mut out = Vec::with_capacity(expected);
        for (i, column) in self.columns.into_iter().enumerate() {
            out.push(SeriesDescriptor {
                column,
                site: self.sites[i].clone(),
                scale: self.scales[i],
                offset: self.offsets[i],
                lower: self.lower[i],
                upper: self.upper[i],
            });
        }
        Ok(out)
    }
}

/// Output time-series block: target file, series start and descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSeries {
    filename: String,
    start: NaiveDateTime,
    descriptors: Vec<SeriesDescriptor>,
}

impl OutputSeries {
    pub fn new(filename: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            filename: filename.into(),
            start,
            descriptors: Vec::new(),
        }
    }

    /// Builds the block from column-wise lists.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::ShapeMismatch`] if the lists disagree in length.
    pub fn from_columns(
        filename: impl Into<String>,
        start: NaiveDateTime,
        columns: SeriesColumns,
    ) -> Result<Self, DeckError> {
        Ok(Self {
            filename: filename.into(),
            start,
            descriptors: columns.into_descriptors()?,
        })
    }

    pub fn with_descriptor(mut self, descriptor: SeriesDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn descriptors(&self) -> &[SeriesDescriptor] {
        &self.descriptors
    }

    /// Section body, without the marker line.
    pub(crate) fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.filename.clone(),
            self.start.format(SERIES_DATETIME_FORMAT).to_string(),
            self.descriptors.len().to_string(),
        ];
        lines.extend(self.descriptors.iter().map(SeriesDescriptor::line));
        lines
    }
}
