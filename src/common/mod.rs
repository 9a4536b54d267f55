//! Common types shared by the model and the extraction pipeline.
pub mod date;

/// The string type used throughout the library.
#[cfg(feature = "smartstring")]
pub type ShortString = smartstring::alias::String;

/// The string type used throughout the library.
#[cfg(not(feature = "smartstring"))]
pub type ShortString = std::string::String;
