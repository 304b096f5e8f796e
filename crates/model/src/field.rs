//! Catalogue of the deck values that can be addressed by name.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A named deck value.
///
/// Names match the keys used in LUMPREM documentation and in project files
/// (`maxvol`, `ks2`, `vegfile`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Maxvol,
    Irrigvolfrac,
    Maxvol2,
    Vol2extra,
    Gamma,
    Rdelay,
    Mdelay,
    Ks,
    M,
    L,
    Mflowmax,
    Ks2,
    M2,
    Offset,
    Factor1,
    Factor2,
    Power,
    Elevmin,
    Elevmax,
    Topsurf,
    Vol,
    Vol2,
    Vegfile,
    Irrigfile,
}

impl Field {
    /// Every field, in deck order.
    pub const ALL: [Field; 24] = [
        Field::Maxvol,
        Field::Irrigvolfrac,
        Field::Maxvol2,
        Field::Vol2extra,
        Field::Gamma,
        Field::Rdelay,
        Field::Mdelay,
        Field::Ks,
        Field::M,
        Field::L,
        Field::Mflowmax,
        Field::Ks2,
        Field::M2,
        Field::Offset,
        Field::Factor1,
        Field::Factor2,
        Field::Power,
        Field::Elevmin,
        Field::Elevmax,
        Field::Topsurf,
        Field::Vol,
        Field::Vol2,
        Field::Vegfile,
        Field::Irrigfile,
    ];

    /// Lower-case field name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Maxvol => "maxvol",
            Field::Irrigvolfrac => "irrigvolfrac",
            Field::Maxvol2 => "maxvol2",
            Field::Vol2extra => "vol2extra",
            Field::Gamma => "gamma",
            Field::Rdelay => "rdelay",
            Field::Mdelay => "mdelay",
            Field::Ks => "ks",
            Field::M => "m",
            Field::L => "l",
            Field::Mflowmax => "mflowmax",
            Field::Ks2 => "ks2",
            Field::M2 => "m2",
            Field::Offset => "offset",
            Field::Factor1 => "factor1",
            Field::Factor2 => "factor2",
            Field::Power => "power",
            Field::Elevmin => "elevmin",
            Field::Elevmax => "elevmax",
            Field::Topsurf => "topsurf",
            Field::Vol => "vol",
            Field::Vol2 => "vol2",
            Field::Vegfile => "vegfile",
            Field::Irrigfile => "irrigfile",
        }
    }

    /// Parameter names of the template tokens this field expands to.
    ///
    /// File references carry a code and a parameter and so expand to two
    /// tokens; every other field expands to one named after itself.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Field::Vegfile => &["vegfil1", "vegfil2"],
            Field::Irrigfile => &["irrfil1", "irrfil2"],
            Field::Maxvol => &["maxvol"],
            Field::Irrigvolfrac => &["irrigvolfrac"],
            Field::Maxvol2 => &["maxvol2"],
            Field::Vol2extra => &["vol2extra"],
            Field::Gamma => &["gamma"],
            Field::Rdelay => &["rdelay"],
            Field::Mdelay => &["mdelay"],
            Field::Ks => &["ks"],
            Field::M => &["m"],
            Field::L => &["l"],
            Field::Mflowmax => &["mflowmax"],
            Field::Ks2 => &["ks2"],
            Field::M2 => &["m2"],
            Field::Offset => &["offset"],
            Field::Factor1 => &["factor1"],
            Field::Factor2 => &["factor2"],
            Field::Power => &["power"],
            Field::Elevmin => &["elevmin"],
            Field::Elevmax => &["elevmax"],
            Field::Topsurf => &["topsurf"],
            Field::Vol => &["vol"],
            Field::Vol2 => &["vol2"],
        }
    }

    /// Whether the field belongs to the optional second bucket.
    pub fn is_second_bucket(self) -> bool {
        matches!(
            self,
            Field::Maxvol2 | Field::Vol2extra | Field::Gamma | Field::Ks2 | Field::M2 | Field::Vol2
        )
    }

    /// Parses a list of field names, failing on the first unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownField`] naming the offending entry.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Field>, ModelError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| ModelError::UnknownField {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
