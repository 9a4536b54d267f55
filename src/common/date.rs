use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;
use std::str::FromStr;

use chrono::format::ParseError;
use chrono::naive::NaiveDate;
use chrono::Datelike;

/// A naive date in the `DD-MMM-YYYY` format of `LOCUS` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    date: NaiveDate,
}

impl Date {
    /// Create a new `Date` from a `chrono` object.
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Get the year component of the date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Get the month component of the date.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Get the day component of the date.
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

impl AsRef<NaiveDate> for Date {
    fn as_ref(&self) -> &NaiveDate {
        &self.date
    }
}

impl Deref for Date {
    type Target = NaiveDate;
    fn deref(&self) -> &NaiveDate {
        &self.date
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.date
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let s = self.date.format("%d-%b-%Y").to_string();
        f.write_str(&s.to_uppercase())
    }
}

impl FromStr for Date {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FORMATS: &[&str] = &["%d-%b-%Y", "%Y-%m-%d"];
        for (i, fmt) in FORMATS.iter().enumerate() {
            match NaiveDate::parse_from_str(s, fmt) {
                Ok(dt) => return Ok(Date::new(dt)),
                Err(e) if i == FORMATS.len() - 1 => return Err(e),
                Err(_) => (),
            }
        }
        unreachable!()
    }
}
