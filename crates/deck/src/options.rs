//! Deck-wide settings that are not model parameters.

use crate::error::DeckError;
use crate::format::FormatVersion;
use crate::output_series::OutputSeries;
use crate::template::TemplateSpec;

/// Initial contents of the recharge and macropore delay buffers.
///
/// Index 0 holds water that left soil-moisture storage one day ago, index 1
/// two days ago, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffers {
    recharge: Vec<f64>,
    macropore: Vec<f64>,
}

impl Default for Buffers {
    fn default() -> Self {
        Self {
            recharge: vec![0.0],
            macropore: vec![0.0],
        }
    }
}

impl Buffers {
    pub fn new(recharge: Vec<f64>, macropore: Vec<f64>) -> Self {
        Self {
            recharge,
            macropore,
        }
    }

    pub fn recharge(&self) -> &[f64] {
        &self.recharge
    }

    pub fn macropore(&self) -> &[f64] {
        &self.macropore
    }
}

/// LUMPREM solver controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    nstep: u32,
    mxiter: u32,
    tol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            nstep: 1,
            mxiter: 100,
            tol: 1.0e-5,
        }
    }
}

impl SolverOptions {
    /// Sub-steps per simulated day.
    pub fn with_nstep(mut self, nstep: u32) -> Self {
        self.nstep = nstep;
        self
    }

    pub fn with_mxiter(mut self, mxiter: u32) -> Self {
        self.mxiter = mxiter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn nstep(&self) -> u32 {
        self.nstep
    }

    pub fn mxiter(&self) -> u32 {
        self.mxiter
    }

    pub fn tol(&self) -> f64 {
        self.tol
    }
}

/// Everything besides the model and its schedule that shapes a deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckOptions {
    buffers: Buffers,
    solver: SolverOptions,
    format: FormatVersion,
    output_series: Option<OutputSeries>,
    template: Option<TemplateSpec>,
}

impl DeckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffers(mut self, buffers: Buffers) -> Self {
        self.buffers = buffers;
        self
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_format(mut self, format: FormatVersion) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_series(mut self, series: OutputSeries) -> Self {
        self.output_series = Some(series);
        self
    }

    /// Also produce a template deck.
    pub fn with_template(mut self, template: TemplateSpec) -> Self {
        self.template = Some(template);
        self
    }

    pub fn buffers(&self) -> &Buffers {
        &self.buffers
    }

    pub fn solver(&self) -> &SolverOptions {
        &self.solver
    }

    pub fn format(&self) -> FormatVersion {
        self.format
    }

    pub fn output_series(&self) -> Option<&OutputSeries> {
        self.output_series.as_ref()
    }

    pub fn template(&self) -> Option<&TemplateSpec> {
        self.template.as_ref()
    }

    /// Checks solver controls, buffer values and the template delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidOptions`] or
    /// [`DeckError::InvalidDelimiter`].
    pub fn validate(&self) -> Result<(), DeckError> {
        let invalid = |reason: String| Err(DeckError::InvalidOptions { reason });
        if self.solver.nstep == 0 {
            return invalid("nstep must be >= 1".to_string());
        }
        if self.solver.mxiter == 0 {
            return invalid("mxiter must be >= 1".to_string());
        }
        if !self.solver.tol.is_finite() || self.solver.tol <= 0.0 {
            return invalid(format!("tol must be finite and > 0, got {}", self.solver.tol));
        }
        for (name, buf) in [
            ("recharge", &self.buffers.recharge),
            ("macropore", &self.buffers.macropore),
        ] {
            if let Some(v) = buf.iter().find(|v| !v.is_finite()) {
                return invalid(format!("{name} buffer holds non-finite value {v}"));
            }
        }
        if let Some(t) = &self.template {
            t.validate()?;
        }
        Ok(())
    }
}
