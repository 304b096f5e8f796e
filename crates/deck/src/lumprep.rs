//! LUMPREP preprocessor input files.
//!
//! LUMPREP builds LUMPREM decks itself from a climate (SILO) file and a list
//! of per-model keyword blocks; this module writes its input file.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use lumpr_calendar::format_date;
use lumpr_model::{FileRef, ModelConfig, fmt_float};
use tracing::info;

use crate::error::DeckError;
use crate::writer::write_text;

/// Column width of keyword names in model blocks.
const KEY_WIDTH: usize = 32;

/// LUMPREP output interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NdayOut {
    /// Every `n` days.
    Interval(u32),
    /// On the first of every month.
    Monthly,
}

impl fmt::Display for NdayOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NdayOut::Interval(n) => write!(f, "{n}"),
            NdayOut::Monthly => f.write_str("monthly"),
        }
    }
}

/// Run-wide LUMPREP settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LumprepInput {
    start_date: NaiveDate,
    end_date: NaiveDate,
    nday_out: NdayOut,
    steps_per_day: u32,
    silofile: String,
    silo_column: String,
    batch_file: String,
    pest_control_file: String,
}

impl LumprepInput {
    /// Settings for a run over `[start_date, end_date]` reading climate data
    /// from `silofile`.
    ///
    /// Defaults: monthly output, one step per day, evaporation column
    /// `evap`, batch file `run.bat`, PEST control file `temp.pst`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, silofile: impl Into<String>) -> Self {
        Self {
            start_date,
            end_date,
            nday_out: NdayOut::Monthly,
            steps_per_day: 1,
            silofile: silofile.into(),
            silo_column: "evap".to_string(),
            batch_file: "run.bat".to_string(),
            pest_control_file: "temp.pst".to_string(),
        }
    }

    pub fn with_nday_out(mut self, nday_out: NdayOut) -> Self {
        self.nday_out = nday_out;
        self
    }

    pub fn with_steps_per_day(mut self, steps: u32) -> Self {
        self.steps_per_day = steps;
        self
    }

    /// SILO column used for evapotranspiration.
    pub fn with_silo_column(mut self, column: impl Into<String>) -> Self {
        self.silo_column = column.into();
        self
    }

    pub fn with_batch_file(mut self, name: impl Into<String>) -> Self {
        self.batch_file = name.into();
        self
    }

    pub fn with_pest_control_file(mut self, name: impl Into<String>) -> Self {
        self.pest_control_file = name.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`DeckError::InvalidOptions`] if the period is reversed, the
    /// step count or output interval is zero, or the SILO file is unnamed.
    pub fn validate(&self) -> Result<(), DeckError> {
        let reason = if self.end_date < self.start_date {
            Some(format!(
                "end date {} precedes start date {}",
                format_date(self.end_date),
                format_date(self.start_date)
            ))
        } else if self.steps_per_day == 0 {
            Some("steps_per_day must be >= 1".to_string())
        } else if self.nday_out == NdayOut::Interval(0) {
            Some("nday_out must be >= 1".to_string())
        } else if self.silofile.trim().is_empty() {
            Some("silofile is empty".to_string())
        } else {
            None
        };
        match reason {
            Some(reason) => Err(DeckError::InvalidOptions { reason }),
            None => Ok(()),
        }
    }
}

/// Renders the LUMPREP input file for `models`, in order.
pub fn render_lumprep(input: &LumprepInput, models: &[ModelConfig]) -> String {
    let mut out = String::from("# File created using lumpr.\n\n");
    out.push_str(&format!("START_DATE {}\n", format_date(input.start_date)));
    out.push_str(&format!("END_DATE {}\n", format_date(input.end_date)));
    out.push_str(&format!("NDAY_OUT {}\n", input.nday_out));
    out.push_str(&format!("STEPS_PER_DAY {}\n", input.steps_per_day));
    out.push('\n');

    for (i, model) in models.iter().enumerate() {
        out.push_str(&format!("# Lumprem dataset number {}\n", i + 1));
        out.push_str(&format!(
            "{:<KEY_WIDTH$} {}\t{}\n",
            "SILOFILE", input.silofile, input.silo_column
        ));
        for (key, first, second) in model_keys(model) {
            out.push_str(&format!("{key:<KEY_WIDTH$}{first}\t{second}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("{:<KEY_WIDTH$} {}\n", "BATCH_FILE_NAME", input.batch_file));
    out.push_str(&format!(
        "{:<KEY_WIDTH$} {}\n",
        "PEST_CONTROL_FILE", input.pest_control_file
    ));
    out.push('\n');
    out
}

/// Writes the LUMPREP input file, creating its parent directory.
///
/// # Errors
///
/// Returns [`DeckError::InvalidOptions`] for invalid settings and
/// [`DeckError::Io`] on write failure.
pub fn write_lumprep(
    path: &Path,
    input: &LumprepInput,
    models: &[ModelConfig],
) -> Result<(), DeckError> {
    input.validate()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DeckError::io(parent, e))?;
    }
    write_text(path, &render_lumprep(input, models))?;
    info!(path = %path.display(), n_models = models.len(), "lumprep input written");
    Ok(())
}

/// Keyword rows of one model block: key, first value, optional second value.
fn model_keys(model: &ModelConfig) -> Vec<(&'static str, String, String)> {
    let file = |f: &FileRef| match f {
        FileRef::Bare(name) => (name.clone(), String::new()),
        FileRef::WithParam { code, param } => (code.clone(), fmt_float(*param)),
    };
    let num = |v: f64| (fmt_float(v), String::new());

    let rows = [
        ("RAINFILE", (model.rainfile().to_string(), String::new())),
        ("EPOTFILE", (model.epotfile().to_string(), String::new())),
        ("VEGFILE", file(model.vegfile())),
        ("IRRIGFILE", file(model.irrigfile())),
        ("MAXVOL", num(model.maxvol())),
        ("IRRIGVOLFRAC", num(model.irrigvolfrac())),
        ("RDELAY", num(model.rdelay())),
        ("MDELAY", num(model.mdelay())),
        ("KS", num(model.ks())),
        ("M", num(model.m())),
        ("L", num(model.l())),
        ("MFLOWMAX", num(model.mflowmax())),
        ("OFFSET", num(model.offset())),
        ("FACTOR1", num(model.factor1())),
        ("FACTOR2", num(model.factor2())),
        ("POWER", num(model.power())),
        ("VOL", num(model.vol())),
        ("LUMPREM_MODEL_NAME", (model.name().to_string(), String::new())),
    ];
    rows.into_iter().map(|(k, (a, b))| (k, a, b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn header_and_trailer() {
        let input = LumprepInput::new(ymd(2000, 1, 1), ymd(2010, 12, 31), "silo.txt")
            .with_steps_per_day(5);
        let text = render_lumprep(&input, &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# File created using lumpr.");
        assert_eq!(lines[2], "START_DATE 01/01/2000");
        assert_eq!(lines[3], "END_DATE 31/12/2010");
        assert_eq!(lines[4], "NDAY_OUT monthly");
        assert_eq!(lines[5], "STEPS_PER_DAY 5");
        assert!(lines[7].starts_with("BATCH_FILE_NAME"));
        assert!(lines[7].ends_with(" run.bat"));
        assert!(lines[8].ends_with(" temp.pst"));
    }

    #[test]
    fn model_block() {
        let input = LumprepInput::new(ymd(2000, 1, 1), ymd(2001, 1, 1), "silo.txt")
            .with_nday_out(NdayOut::Interval(7));
        let model = ModelConfig::builder("lr1").build().unwrap();
        let text = render_lumprep(&input, &[model]);

        assert!(text.contains("NDAY_OUT 7\n"));
        assert!(text.contains("# Lumprem dataset number 1\n"));
        assert!(text.contains(&format!("{:<32} silo.txt\tevap\n", "SILOFILE")));
        assert!(text.contains(&format!("{:<32}0.2\t1.5\n", "VEGFILE")));
        assert!(text.contains(&format!("{:<32}0.5\t\n", "MAXVOL")));
        assert!(text.contains(&format!("{:<32}lr1\t\n", "LUMPREM_MODEL_NAME")));
        assert!(!text.contains("ELEVMIN"));
        assert!(!text.contains("WORKSPACE"));
    }

    #[test]
    fn validation() {
        let reversed = LumprepInput::new(ymd(2001, 1, 1), ymd(2000, 1, 1), "silo.txt");
        assert!(reversed.validate().is_err());
        let zero_steps =
            LumprepInput::new(ymd(2000, 1, 1), ymd(2001, 1, 1), "silo.txt").with_steps_per_day(0);
        assert!(zero_steps.validate().is_err());
        let zero_interval = LumprepInput::new(ymd(2000, 1, 1), ymd(2001, 1, 1), "silo.txt")
            .with_nday_out(NdayOut::Interval(0));
        assert!(zero_interval.validate().is_err());
    }
}
