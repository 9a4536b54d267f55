use std::str::FromStr;

use crate::common::date::Date;
use crate::common::ShortString;
use crate::error::InvalidValue;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The content of a `LOCUS` line.
///
/// Only the locus name is mandatory: the other columns are frequently
/// missing or misaligned in files produced by third-party tools, so they
/// are recognized by their content rather than by their position.
pub struct Locus {
    pub name: String,
    pub length: Option<usize>,
    pub molecule: Option<ShortString>,
    pub topology: Option<Topology>,
    pub division: Option<ShortString>,
    pub date: Option<Date>,
}

impl Locus {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            length: None,
            molecule: None,
            topology: None,
            division: None,
            date: None,
        }
    }
}

impl FromStr for Locus {
    type Err = InvalidValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.strip_prefix("LOCUS").unwrap_or(s);
        let mut tokens = line.split_whitespace().peekable();
        let mut locus = tokens
            .next()
            .map(Locus::new)
            .ok_or_else(|| InvalidValue::from(s))?;

        while let Some(token) = tokens.next() {
            if let Some(unit) = tokens.peek().filter(|u| **u == "bp" || **u == "aa") {
                if let Ok(length) = usize::from_str(token) {
                    locus.length = Some(length);
                    let unit = *unit;
                    tokens.next();
                    if unit == "bp" {
                        locus.molecule = tokens.next().map(ShortString::from);
                    } else {
                        locus.molecule = Some(ShortString::from("protein"));
                    }
                    continue;
                }
            }
            if let Ok(topology) = Topology::from_str(token) {
                locus.topology = Some(topology);
            } else if let Ok(date) = Date::from_str(token) {
                locus.date = Some(date);
            } else if token.len() == 3 && token.bytes().all(|b| b.is_ascii_uppercase()) {
                locus.division = Some(ShortString::from(token));
            }
        }

        Ok(locus)
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The topology of a record molecule.
pub enum Topology {
    Linear,
    Circular,
}

impl FromStr for Topology {
    type Err = InvalidValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Topology::Linear),
            "circular" => Ok(Topology::Circular),
            other => Err(InvalidValue::from(other)),
        }
    }
}
