//! Ubiquitous types for error management.

use std::io::Error as IoError;

use thiserror::Error;

#[derive(Debug, Error)]
/// The main error type for the `gbcodon` crate.
///
/// Apart from [`Error::Io`] and [`Error::Csv`], every variant describes a
/// single damaged entry: the parser skips it and carries on with the next one.
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] IoError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid UTF-8 in entry starting at line {line}")]
    InvalidUtf8 { line: usize },
    #[error("unexpected end of file in entry starting at line {line}")]
    UnexpectedEof { line: usize },
    #[error("feature `{key}` without qualifiers in entry starting at line {line}")]
    EmptyFeature { key: String, line: usize },
    #[error("missing accession in entry starting at line {line}")]
    MissingAccession { line: usize },
}

impl Error {
    /// Get the line where the damaged entry started, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEof { line }
            | Error::EmptyFeature { line, .. }
            | Error::MissingAccession { line }
            | Error::InvalidUtf8 { line } => Some(*line),
            Error::Io(_) | Error::Csv(_) => None,
        }
    }

    /// Check whether parsing can resume after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Csv(_))
    }
}

/// The main result type for the `gbcodon` crate.
pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------

#[derive(Default, Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value: {0}")]
/// The error type for types with constrained values.
pub struct InvalidValue(pub String);

impl<S: Into<String>> From<S> for InvalidValue {
    fn from(s: S) -> Self {
        InvalidValue(s.into())
    }
}
