use super::feature::Feature;
use super::locus::Locus;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single GenBank entry, from its `LOCUS` line to the `//` terminator.
pub struct GenomeRecord {
    pub locus: Locus,
    pub definition: Option<String>,
    pub accessions: Vec<String>,
    pub version: Option<String>,
    pub features: Vec<Feature>,
    /// The `ORIGIN` sequence, uppercased, or an empty string if absent.
    pub sequence: String,
}

impl GenomeRecord {
    pub fn new(locus: Locus) -> Self {
        Self {
            locus,
            definition: None,
            accessions: Vec::new(),
            version: None,
            features: Vec::new(),
            sequence: String::new(),
        }
    }

    /// Get the identifier of the record.
    ///
    /// This is the versioned accession (e.g. `NC_000913.3`) when a `VERSION`
    /// line is present, or the primary accession, or the locus name.
    pub fn id(&self) -> &str {
        self.version
            .as_deref()
            .or_else(|| self.accessions.first().map(String::as_str))
            .unwrap_or(&self.locus.name)
    }

    /// Iterate over the coding sequence features of the record.
    pub fn cds(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_cds())
    }
}
