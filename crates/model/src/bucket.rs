//! Optional second storage bucket.

use serde::Deserialize;

use crate::config::ModelConfig;
use crate::validate::ValidationCollector;

/// Parameters of LUMPREM's optional second bucket.
///
/// Every field is optional. As an override set (before [`resolve`]) an unset
/// field means "inherit from the primary bucket"; after resolution an unset
/// field is written to the deck as an empty token.
///
/// [`resolve`]: SecondBucket::resolve
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SecondBucket {
    maxvol2: Option<f64>,
    vol2extra: Option<f64>,
    gamma: Option<f64>,
    ks2: Option<f64>,
    m2: Option<f64>,
    vol2: Option<f64>,
    epotfile2: Option<String>,
}

impl SecondBucket {
    /// An empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills unset fields from their primary-bucket counterparts.
    ///
    /// `maxvol2`, `ks2`, `m2`, `vol2` and `epotfile2` default to `maxvol`,
    /// `ks`, `m`, `vol` and `epotfile`. `vol2extra` and `gamma` have no
    /// counterpart and stay as given.
    pub fn resolve(primary: &ModelConfig, overrides: SecondBucket) -> SecondBucket {
        SecondBucket {
            maxvol2: overrides.maxvol2.or(Some(primary.maxvol())),
            vol2extra: overrides.vol2extra,
            gamma: overrides.gamma,
            ks2: overrides.ks2.or(Some(primary.ks())),
            m2: overrides.m2.or(Some(primary.m())),
            vol2: overrides.vol2.or(Some(primary.vol())),
            epotfile2: overrides
                .epotfile2
                .or_else(|| Some(primary.epotfile().to_string())),
        }
    }

    pub fn with_maxvol2(mut self, v: f64) -> Self {
        self.maxvol2 = Some(v);
        self
    }

    pub fn with_vol2extra(mut self, v: f64) -> Self {
        self.vol2extra = Some(v);
        self
    }

    pub fn with_gamma(mut self, v: f64) -> Self {
        self.gamma = Some(v);
        self
    }

    pub fn with_ks2(mut self, v: f64) -> Self {
        self.ks2 = Some(v);
        self
    }

    pub fn with_m2(mut self, v: f64) -> Self {
        self.m2 = Some(v);
        self
    }

    pub fn with_vol2(mut self, v: f64) -> Self {
        self.vol2 = Some(v);
        self
    }

    pub fn with_epotfile2(mut self, name: impl Into<String>) -> Self {
        self.epotfile2 = Some(name.into());
        self
    }

    pub fn maxvol2(&self) -> Option<f64> {
        self.maxvol2
    }

    pub fn vol2extra(&self) -> Option<f64> {
        self.vol2extra
    }

    pub fn gamma(&self) -> Option<f64> {
        self.gamma
    }

    pub fn ks2(&self) -> Option<f64> {
        self.ks2
    }

    pub fn m2(&self) -> Option<f64> {
        self.m2
    }

    pub fn vol2(&self) -> Option<f64> {
        self.vol2
    }

    pub fn epotfile2(&self) -> Option<&str> {
        self.epotfile2.as_deref()
    }

    /// Fields without a primary counterpart that are still unset.
    ///
    /// LUMPREM reads all five earth-property values of the second bucket
    /// from one line, so any name returned here shortens that line.
    pub fn missing_earth_properties(&self) -> Vec<&'static str> {
        [("vol2extra", self.vol2extra), ("gamma", self.gamma)]
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    pub(crate) fn check(&self, c: &mut ValidationCollector) {
        for (name, value) in [
            ("maxvol2", self.maxvol2),
            ("vol2extra", self.vol2extra),
            ("gamma", self.gamma),
            ("ks2", self.ks2),
            ("m2", self.m2),
            ("vol2", self.vol2),
        ] {
            if let Some(v) = value {
                c.finite(name, v);
            }
        }
        if let Some(v) = self.maxvol2 {
            c.check(v > 0.0, || format!("maxvol2 must be > 0, got {v}"));
        }
        if let Some(name) = &self.epotfile2 {
            c.check(!name.is_empty() && !name.contains(char::is_whitespace), || {
                format!("epotfile2 '{name}' must be a single token")
            });
        }
    }
}
