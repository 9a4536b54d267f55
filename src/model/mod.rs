//! Data types for GenBank records.

mod feature;
mod location;
mod locus;
mod qualifiers;
mod record;

pub use self::feature::Feature;
pub use self::feature::FeatureKind;
pub use self::location::reverse_complement;
pub use self::location::Location;
pub use self::locus::Locus;
pub use self::locus::Topology;
pub use self::qualifiers::Qualifiers;
pub use self::record::GenomeRecord;
