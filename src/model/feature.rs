use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

use crate::common::ShortString;
use crate::error::InvalidValue;

use super::location::Location;
use super::qualifiers::Qualifiers;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single entry of the feature table of a record.
pub struct Feature {
    /// The feature key, such as `CDS` or `gene`.
    pub kind: FeatureKind,
    /// The location exactly as written in the flat file, with line breaks removed.
    pub location: String,
    pub qualifiers: Qualifiers,
}

impl Feature {
    pub fn new<L: Into<String>>(kind: FeatureKind, location: L) -> Self {
        Self {
            kind,
            location: location.into(),
            qualifiers: Qualifiers::new(),
        }
    }

    /// Parse the location of the feature.
    pub fn parse_location(&self) -> Result<Location, InvalidValue> {
        Location::from_str(&self.location)
    }

    /// Check whether the feature is a coding sequence.
    pub fn is_cds(&self) -> bool {
        self.kind == FeatureKind::Cds
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The key of a feature.
///
/// Keys without a dedicated variant are kept verbatim in `Other`.
pub enum FeatureKind {
    Cds,
    Gene,
    Source,
    Other(ShortString),
}

impl FeatureKind {
    pub fn as_str(&self) -> &str {
        match self {
            FeatureKind::Cds => "CDS",
            FeatureKind::Gene => "gene",
            FeatureKind::Source => "source",
            FeatureKind::Other(key) => key.as_str(),
        }
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = InvalidValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(InvalidValue::from(s)),
            "CDS" => Ok(FeatureKind::Cds),
            "gene" => Ok(FeatureKind::Gene),
            "source" => Ok(FeatureKind::Source),
            other => Ok(FeatureKind::Other(ShortString::from(other))),
        }
    }
}
