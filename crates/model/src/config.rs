//! One LUMPREM model's parameter set.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::bucket::SecondBucket;
use crate::error::ModelError;
use crate::file_ref::FileRef;
use crate::validate::ValidationCollector;

/// Longest model name LUMPREM accepts in its file names.
pub const MAX_MODEL_NAME_LEN: usize = 12;

/// The complete parameter set of one LUMPREM model.
///
/// Built through [`ModelConfig::builder`]; every parameter not set explicitly
/// takes the documented LUMPREM default. A built config is always valid.
///
/// # Example
///
/// ```
/// use lumpr_model::{FileRef, ModelConfig};
///
/// let config = ModelConfig::builder("lr1")
///     .with_maxvol(0.8)
///     .with_irrigfile(FileRef::with_param("1", 0.5))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.vol(), 0.4);
/// assert_eq!(config.deck_file_name(), "lr_lr1.in");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    name: String,
    maxvol: f64,
    irrigvolfrac: f64,
    rdelay: f64,
    mdelay: f64,
    ks: f64,
    m: f64,
    l: f64,
    mflowmax: f64,
    offset: f64,
    factor1: f64,
    factor2: f64,
    power: f64,
    elevmin: f64,
    elevmax: f64,
    topsurf: f64,
    vol: f64,
    vegfile: FileRef,
    rainfile: String,
    epotfile: String,
    irrigfile: FileRef,
    workspace: PathBuf,
    second_bucket: Option<SecondBucket>,
}

impl ModelConfig {
    /// Starts a builder for a model called `name`.
    pub fn builder(name: impl Into<String>) -> ModelConfigBuilder {
        ModelConfigBuilder::new(name)
    }

    /// Returns a builder seeded with this config's values, for editing.
    ///
    /// The second bucket, if any, is carried over in its resolved form.
    pub fn to_builder(&self) -> ModelConfigBuilder {
        ModelConfigBuilder {
            name: self.name.clone(),
            maxvol: self.maxvol,
            irrigvolfrac: self.irrigvolfrac,
            rdelay: self.rdelay,
            mdelay: self.mdelay,
            ks: self.ks,
            m: self.m,
            l: self.l,
            mflowmax: self.mflowmax,
            offset: self.offset,
            factor1: self.factor1,
            factor2: self.factor2,
            power: self.power,
            elevmin: self.elevmin,
            elevmax: self.elevmax,
            topsurf: Some(self.topsurf),
            vol: Some(self.vol),
            vegfile: self.vegfile.clone(),
            rainfile: self.rainfile.clone(),
            epotfile: self.epotfile.clone(),
            irrigfile: self.irrigfile.clone(),
            workspace: self.workspace.clone(),
            second_bucket: self.second_bucket.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn maxvol(&self) -> f64 {
        self.maxvol
    }

    pub fn irrigvolfrac(&self) -> f64 {
        self.irrigvolfrac
    }

    pub fn rdelay(&self) -> f64 {
        self.rdelay
    }

    pub fn mdelay(&self) -> f64 {
        self.mdelay
    }

    pub fn ks(&self) -> f64 {
        self.ks
    }

    pub fn m(&self) -> f64 {
        self.m
    }

    pub fn l(&self) -> f64 {
        self.l
    }

    pub fn mflowmax(&self) -> f64 {
        self.mflowmax
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn factor1(&self) -> f64 {
        self.factor1
    }

    pub fn factor2(&self) -> f64 {
        self.factor2
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn elevmin(&self) -> f64 {
        self.elevmin
    }

    pub fn elevmax(&self) -> f64 {
        self.elevmax
    }

    /// Topographic surface elevation.
    pub fn topsurf(&self) -> f64 {
        self.topsurf
    }

    /// Initial soil-moisture volume.
    pub fn vol(&self) -> f64 {
        self.vol
    }

    pub fn vegfile(&self) -> &FileRef {
        &self.vegfile
    }

    pub fn rainfile(&self) -> &str {
        &self.rainfile
    }

    pub fn epotfile(&self) -> &str {
        &self.epotfile
    }

    pub fn irrigfile(&self) -> &FileRef {
        &self.irrigfile
    }

    /// Directory holding every file of this model.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// The resolved second bucket, if enabled.
    pub fn second_bucket(&self) -> Option<&SecondBucket> {
        self.second_bucket.as_ref()
    }

    /// `lr_<name>.in`
    pub fn deck_file_name(&self) -> String {
        format!("lr_{}.in", self.name)
    }

    /// `lr_<name>.tpl`
    pub fn template_file_name(&self) -> String {
        format!("lr_{}.tpl", self.name)
    }

    /// `lr_<name>.out`
    pub fn output_file_name(&self) -> String {
        format!("lr_{}.out", self.name)
    }

    /// Every parameter as a `(name, value)` pair, in a fixed order.
    ///
    /// Disabled second-bucket fields appear as [`ParamValue::Missing`].
    pub fn parameters(&self) -> Vec<(&'static str, ParamValue)> {
        use ParamValue::{Number, Text};

        let bucket = self.second_bucket.as_ref();
        let opt = |v: Option<f64>| v.map_or(ParamValue::Missing, Number);
        vec![
            ("name", Text(self.name.clone())),
            ("maxvol", Number(self.maxvol)),
            ("irrigvolfrac", Number(self.irrigvolfrac)),
            ("rdelay", Number(self.rdelay)),
            ("mdelay", Number(self.mdelay)),
            ("ks", Number(self.ks)),
            ("m", Number(self.m)),
            ("l", Number(self.l)),
            ("mflowmax", Number(self.mflowmax)),
            ("offset", Number(self.offset)),
            ("factor1", Number(self.factor1)),
            ("factor2", Number(self.factor2)),
            ("power", Number(self.power)),
            ("elevmin", Number(self.elevmin)),
            ("elevmax", Number(self.elevmax)),
            ("topsurf", Number(self.topsurf)),
            ("vol", Number(self.vol)),
            ("vegfile", Text(self.vegfile.to_string())),
            ("rainfile", Text(self.rainfile.clone())),
            ("epotfile", Text(self.epotfile.clone())),
            ("irrigfile", Text(self.irrigfile.to_string())),
            ("workspace", Text(self.workspace.display().to_string())),
            ("maxvol2", opt(bucket.and_then(SecondBucket::maxvol2))),
            ("vol2extra", opt(bucket.and_then(SecondBucket::vol2extra))),
            ("gamma", opt(bucket.and_then(SecondBucket::gamma))),
            ("ks2", opt(bucket.and_then(SecondBucket::ks2))),
            ("m2", opt(bucket.and_then(SecondBucket::m2))),
            ("vol2", opt(bucket.and_then(SecondBucket::vol2))),
            (
                "epotfile2",
                bucket
                    .and_then(SecondBucket::epotfile2)
                    .map_or(ParamValue::Missing, |s| Text(s.to_string())),
            ),
        ]
    }
}

/// A parameter value as exported alongside model results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    /// Not configured; serialises as `null`.
    Missing,
}

/// Builder for [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ModelConfigBuilder {
    name: String,
    maxvol: f64,
    irrigvolfrac: f64,
    rdelay: f64,
    mdelay: f64,
    ks: f64,
    m: f64,
    l: f64,
    mflowmax: f64,
    offset: f64,
    factor1: f64,
    factor2: f64,
    power: f64,
    elevmin: f64,
    elevmax: f64,
    topsurf: Option<f64>,
    vol: Option<f64>,
    vegfile: FileRef,
    rainfile: String,
    epotfile: String,
    irrigfile: FileRef,
    workspace: PathBuf,
    second_bucket: Option<SecondBucket>,
}

macro_rules! setters {
    ($($(#[$doc:meta])* $method:ident => $field:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(mut self, value: f64) -> Self {
                self.$field = value;
                self
            }
        )*
    };
}

impl ModelConfigBuilder {
    /// A builder holding LUMPREM's default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maxvol: 0.5,
            irrigvolfrac: 0.5,
            rdelay: 5.0,
            mdelay: 1.0,
            ks: 0.1,
            m: 0.5,
            l: 0.5,
            mflowmax: 0.1,
            offset: 0.0,
            factor1: 1.0,
            factor2: 1.0,
            power: 0.0,
            elevmin: -1.0e10,
            elevmax: 1.0e10,
            topsurf: None,
            vol: None,
            vegfile: FileRef::with_param("0.2", 1.5),
            rainfile: "rain.dat".to_string(),
            epotfile: "epot.dat".to_string(),
            irrigfile: FileRef::with_param("1", 1.0),
            workspace: PathBuf::from("."),
            second_bucket: None,
        }
    }

    setters! {
        /// Soil-moisture storage capacity.
        with_maxvol => maxvol,
        /// Fraction of capacity below which irrigation starts.
        with_irrigvolfrac => irrigvolfrac,
        /// Recharge delay in days.
        with_rdelay => rdelay,
        /// Macropore delay in days.
        with_mdelay => mdelay,
        with_ks => ks,
        with_m => m,
        with_l => l,
        with_mflowmax => mflowmax,
        with_offset => offset,
        with_factor1 => factor1,
        with_factor2 => factor2,
        with_power => power,
        with_elevmin => elevmin,
        with_elevmax => elevmax,
    }

    /// Sets the topographic surface; defaults to `offset`.
    pub fn with_topsurf(mut self, value: f64) -> Self {
        self.topsurf = Some(value);
        self
    }

    /// Sets the initial volume; defaults to half of `maxvol`.
    pub fn with_vol(mut self, value: f64) -> Self {
        self.vol = Some(value);
        self
    }

    pub fn with_vegfile(mut self, file: FileRef) -> Self {
        self.vegfile = file;
        self
    }

    pub fn with_rainfile(mut self, name: impl Into<String>) -> Self {
        self.rainfile = name.into();
        self
    }

    pub fn with_epotfile(mut self, name: impl Into<String>) -> Self {
        self.epotfile = name.into();
        self
    }

    pub fn with_irrigfile(mut self, file: FileRef) -> Self {
        self.irrigfile = file;
        self
    }

    pub fn with_workspace(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace = dir.into();
        self
    }

    /// Enables the second bucket. Unset fields are inherited at build time
    /// (see [`SecondBucket::resolve`]).
    pub fn with_second_bucket(mut self, overrides: SecondBucket) -> Self {
        self.second_bucket = Some(overrides);
        self
    }

    /// Validates every parameter and builds the config.
    ///
    /// All violations are reported together. An initial volume outside
    /// `[0, maxvol]`, or a second bucket without `vol2extra` or `gamma`, is
    /// logged as a warning, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] listing every failed check.
    pub fn build(self) -> Result<ModelConfig, ModelError> {
        let mut c = ValidationCollector::new();

        c.check(!self.name.is_empty(), || "model name is empty".to_string());
        c.check(!self.name.contains(char::is_whitespace), || {
            format!("model name '{}' contains whitespace", self.name)
        });
        c.check(self.name.chars().count() <= MAX_MODEL_NAME_LEN, || {
            format!(
                "model name '{}' longer than {MAX_MODEL_NAME_LEN} characters",
                self.name
            )
        });

        for (name, value) in [
            ("maxvol", self.maxvol),
            ("irrigvolfrac", self.irrigvolfrac),
            ("rdelay", self.rdelay),
            ("mdelay", self.mdelay),
            ("ks", self.ks),
            ("m", self.m),
            ("l", self.l),
            ("mflowmax", self.mflowmax),
            ("offset", self.offset),
            ("factor1", self.factor1),
            ("factor2", self.factor2),
            ("power", self.power),
            ("elevmin", self.elevmin),
            ("elevmax", self.elevmax),
        ] {
            c.finite(name, value);
        }
        if let Some(v) = self.topsurf {
            c.finite("topsurf", v);
        }
        if let Some(v) = self.vol {
            c.finite("vol", v);
        }

        c.check(self.maxvol > 0.0, || {
            format!("maxvol must be > 0, got {}", self.maxvol)
        });
        c.check((0.0..=1.0).contains(&self.irrigvolfrac), || {
            format!("irrigvolfrac must be in [0, 1], got {}", self.irrigvolfrac)
        });
        c.check(self.rdelay >= 0.0, || {
            format!("rdelay must be >= 0, got {}", self.rdelay)
        });
        c.check(self.mdelay >= 0.0, || {
            format!("mdelay must be >= 0, got {}", self.mdelay)
        });
        c.check(self.elevmin <= self.elevmax, || {
            format!(
                "elevmin {} exceeds elevmax {}",
                self.elevmin, self.elevmax
            )
        });

        for (name, file) in [("vegfile", &self.vegfile), ("irrigfile", &self.irrigfile)] {
            if let Some(problem) = file.problem() {
                c.push(format!("{name}: {problem}"));
            }
        }
        for (name, file) in [("rainfile", &self.rainfile), ("epotfile", &self.epotfile)] {
            c.check(!file.is_empty() && !file.contains(char::is_whitespace), || {
                format!("{name} '{file}' must be a single token")
            });
        }
        if let Some(bucket) = &self.second_bucket {
            bucket.check(&mut c);
        }

        c.finish()?;

        let vol = self.vol.unwrap_or(self.maxvol / 2.0);
        if !(0.0..=self.maxvol).contains(&vol) {
            warn!(
                model = %self.name,
                vol,
                maxvol = self.maxvol,
                "initial volume outside [0, maxvol]"
            );
        }

        let mut config = ModelConfig {
            topsurf: self.topsurf.unwrap_or(self.offset),
            vol,
            name: self.name,
            maxvol: self.maxvol,
            irrigvolfrac: self.irrigvolfrac,
            rdelay: self.rdelay,
            mdelay: self.mdelay,
            ks: self.ks,
            m: self.m,
            l: self.l,
            mflowmax: self.mflowmax,
            offset: self.offset,
            factor1: self.factor1,
            factor2: self.factor2,
            power: self.power,
            elevmin: self.elevmin,
            elevmax: self.elevmax,
            vegfile: self.vegfile,
            rainfile: self.rainfile,
            epotfile: self.epotfile,
            irrigfile: self.irrigfile,
            workspace: self.workspace,
            second_bucket: None,
        };
        config.second_bucket = self
            .second_bucket
            .map(|overrides| SecondBucket::resolve(&config, overrides));
        if let Some(bucket) = &config.second_bucket {
            let missing = bucket.missing_earth_properties();
            if !missing.is_empty() {
                warn!(
                    model = %config.name,
                    missing = %missing.join(", "),
                    "second bucket earth-properties line is incomplete"
                );
            }
        }
        Ok(config)
    }
}
