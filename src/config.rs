use std::path::PathBuf;

use lumpr_model::{FileRef, SecondBucket};
use serde::Deserialize;

/// Top-level lumpr project file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LumprConfig {
    /// Directory holding every generated and produced file.
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Simulation period and output cadence.
    pub simulation: SimulationToml,

    /// Solver settings.
    #[serde(default)]
    pub solver: SolverToml,

    /// External program names or paths.
    #[serde(default)]
    pub executables: ExecutablesToml,

    /// Results file settings.
    #[serde(default)]
    pub results: ResultsToml,

    /// Template file settings.
    #[serde(default)]
    pub template: TemplateToml,

    /// LUMPREP input file settings.
    #[serde(default)]
    pub lumprep: Option<LumprepToml>,

    /// One table per LUMPREM model.
    #[serde(default, rename = "model")]
    pub models: Vec<ModelToml>,

    /// `lr2series` input file settings.
    #[serde(default)]
    pub bridge: Option<BridgeToml>,
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationToml {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub num_days: Option<u32>,
    #[serde(default = "default_nday_out")]
    pub nday_out: NdayOutToml,
    #[serde(default = "default_format")]
    pub format: String,
}

/// Output cadence: a count of evenly spaced days, an explicit day list, or
/// `"monthly"` / `"annual"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NdayOutToml {
    Count(usize),
    Days(Vec<u32>),
    Named(String),
}

fn default_nday_out() -> NdayOutToml {
    NdayOutToml::Named("monthly".to_string())
}
fn default_format() -> String {
    "wrapped".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverToml {
    #[serde(default = "default_nstep")]
    pub nstep: u32,
    #[serde(default = "default_mxiter")]
    pub mxiter: u32,
    #[serde(default = "default_tol")]
    pub tol: f64,
}

impl Default for SolverToml {
    fn default() -> Self {
        Self {
            nstep: default_nstep(),
            mxiter: default_mxiter(),
            tol: default_tol(),
        }
    }
}

fn default_nstep() -> u32 {
    1
}
fn default_mxiter() -> u32 {
    100
}
fn default_tol() -> f64 {
    1e-5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutablesToml {
    #[serde(default = "default_lumprem")]
    pub lumprem: String,
    #[serde(default = "default_lumprep")]
    pub lumprep: String,
    #[serde(default = "default_lr2series")]
    pub lr2series: String,
}

impl Default for ExecutablesToml {
    fn default() -> Self {
        Self {
            lumprem: default_lumprem(),
            lumprep: default_lumprep(),
            lr2series: default_lr2series(),
        }
    }
}

fn default_lumprem() -> String {
    "lumprem".to_string()
}
fn default_lumprep() -> String {
    "lumprep".to_string()
}
fn default_lr2series() -> String {
    "lr2series".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultsToml {
    #[serde(default = "default_footer_lines")]
    pub footer_lines: usize,
}

impl Default for ResultsToml {
    fn default() -> Self {
        Self {
            footer_lines: default_footer_lines(),
        }
    }
}

fn default_footer_lines() -> usize {
    lumpr_io::DEFAULT_FOOTER_LINES
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateToml {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for TemplateToml {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    lumpr_deck::DEFAULT_DELIMITER
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LumprepToml {
    pub silofile: String,
    #[serde(default = "default_lumprep_file")]
    pub file: String,
    #[serde(default = "default_nday_out")]
    pub nday_out: NdayOutToml,
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u32,
    #[serde(default = "default_silo_column")]
    pub silo_column: String,
    #[serde(default = "default_batch_file")]
    pub batch_file: String,
    #[serde(default = "default_pest_control_file")]
    pub pest_control_file: String,
}

fn default_lumprep_file() -> String {
    "lumprep.in".to_string()
}
fn default_steps_per_day() -> u32 {
    1
}
fn default_silo_column() -> String {
    "evap".to_string()
}
fn default_batch_file() -> String {
    "run.bat".to_string()
}
fn default_pest_control_file() -> String {
    "temp.pst".to_string()
}

/// One LUMPREM model. Unset parameters keep LUMPREM's defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    pub name: String,
    pub maxvol: Option<f64>,
    pub irrigvolfrac: Option<f64>,
    pub rdelay: Option<f64>,
    pub mdelay: Option<f64>,
    pub ks: Option<f64>,
    pub m: Option<f64>,
    pub l: Option<f64>,
    pub mflowmax: Option<f64>,
    pub offset: Option<f64>,
    pub factor1: Option<f64>,
    pub factor2: Option<f64>,
    pub power: Option<f64>,
    pub elevmin: Option<f64>,
    pub elevmax: Option<f64>,
    pub topsurf: Option<f64>,
    pub vol: Option<f64>,
    pub vegfile: Option<FileRef>,
    pub irrigfile: Option<FileRef>,
    pub rainfile: Option<String>,
    pub epotfile: Option<String>,

    /// Fields written as template markers.
    #[serde(default)]
    pub template: Vec<String>,

    #[serde(default = "default_buffer")]
    pub recharge_buffer: Vec<f64>,
    #[serde(default = "default_buffer")]
    pub macropore_buffer: Vec<f64>,

    pub second_bucket: Option<SecondBucket>,
    pub irrigation: Option<IrrigationToml>,
    pub output_series: Option<OutputSeriesToml>,
}

fn default_buffer() -> Vec<f64> {
    vec![0.0]
}

/// Annual irrigation window. Days are offsets from the simulation start
/// or `dd/mm/yyyy` dates.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IrrigationToml {
    pub start: DayOrDateToml,
    pub end: Option<DayOrDateToml>,
    #[serde(default = "default_fraction_of_year")]
    pub fraction_of_year: f64,
    /// Last window start; defaults to the end of the simulation.
    pub horizon: Option<DayOrDateToml>,
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Schedule file name; defaults to `irrig_<model>.dat`.
    pub file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DayOrDateToml {
    Offset(i64),
    Date(String),
}

fn default_fraction_of_year() -> f64 {
    0.5
}
fn default_rate() -> f64 {
    lumpr_calendar::DEFAULT_RATE
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSeriesToml {
    pub filename: String,
    /// `dd/mm/yyyy HH:MM:SS`.
    pub start: String,
    pub columns: Vec<String>,
    pub sites: Vec<String>,
    pub scales: Vec<f64>,
    pub offsets: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeToml {
    #[serde(default = "default_bridge_file")]
    pub file: String,
    #[serde(default)]
    pub read: Vec<BridgeReadToml>,
    #[serde(default)]
    pub write: Vec<BridgeWriteToml>,
}

fn default_bridge_file() -> String {
    "lr2series.in".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeReadToml {
    /// Model whose output file is read.
    pub model: String,
    pub columns: Vec<BridgeColumnToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeColumnToml {
    pub my_name: String,
    pub lumprem_name: String,
    #[serde(default = "default_true")]
    pub divide_by_delta_t: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeWriteToml {
    pub file: String,
    pub series: Vec<BridgeSeriesToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSeriesToml {
    pub name: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_scale() -> f64 {
    1.0
}
fn default_method() -> String {
    "linearend".to_string()
}
