//! Selection and extraction of functional coding sequences.
//!
//! Only `CDS` features are considered. A feature is excluded when its
//! `product` contains `hypothetical` or `pseudogene` anywhere, compared
//! case-insensitively: this is a plain substring match, so a product such
//! as *"conserved hypothetical-like protein"* is excluded as well.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::slice::Iter;

use crate::common::ShortString;
use crate::model::Feature;
use crate::model::GenomeRecord;

/// The gene label used for features without a `gene` qualifier.
pub const UNKNOWN_GENE: &str = "unknown";

/// The separator between the components of a sequence label.
pub const LABEL_DELIMITER: char = '_';

const EXCLUDED_PRODUCTS: &[&str] = &["hypothetical", "pseudogene"];

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
/// The kind of sequence extracted from each coding sequence.
pub enum Mode {
    /// The protein sequence given in the `translation` qualifier.
    #[cfg_attr(feature = "cli", value(alias = "protein"))]
    Translation,
    /// The nucleotide sequence covered by the feature location.
    #[cfg_attr(feature = "cli", value(alias = "dna"))]
    Nucleotide,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Translation
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The residues of an extracted sequence.
pub enum Residues {
    Protein(String),
    Nucleotide(String),
}

impl Residues {
    pub fn as_str(&self) -> &str {
        match self {
            Residues::Protein(s) | Residues::Nucleotide(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A coding sequence extracted from a record.
pub struct ExtractedSequence {
    gene: ShortString,
    record: String,
    file: String,
    residues: Residues,
}

impl ExtractedSequence {
    pub fn new<G, R, F>(gene: G, record: R, file: F, residues: Residues) -> Self
    where
        G: Into<ShortString>,
        R: Into<String>,
        F: Into<String>,
    {
        Self {
            gene: gene.into(),
            record: record.into(),
            file: file.into(),
            residues,
        }
    }

    /// The gene name, or `unknown` when the feature had none.
    pub fn gene(&self) -> &str {
        self.gene.as_str()
    }

    /// The identifier of the record the sequence was extracted from.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// The name of the file the record was read from.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn residues(&self) -> &Residues {
        &self.residues
    }

    /// Get the sequence label, e.g. `polA_NC_000913.3_x.gbff.gz`.
    pub fn label(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.gene,
            self.record,
            self.file,
            d = LABEL_DELIMITER
        )
    }
}

impl Display for ExtractedSequence {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}: {}", self.label(), self.residues.as_str())
    }
}

// ---------------------------------------------------------------------------

/// Check whether a product description excludes a coding sequence.
pub fn is_excluded(product: &str) -> bool {
    let product = product.to_lowercase();
    EXCLUDED_PRODUCTS.iter().any(|word| product.contains(word))
}

/// Extract the functional coding sequences of `record`.
///
/// `file` is recorded in every extracted sequence to identify its source.
pub fn extract<'r>(record: &'r GenomeRecord, file: &'r str, mode: Mode) -> Extractor<'r> {
    Extractor::new(record, file, mode)
}

/// An iterator over the functional coding sequences of a record.
pub struct Extractor<'r> {
    record: &'r GenomeRecord,
    file: &'r str,
    mode: Mode,
    features: Iter<'r, Feature>,
}

impl<'r> Extractor<'r> {
    pub fn new(record: &'r GenomeRecord, file: &'r str, mode: Mode) -> Self {
        Self {
            record,
            file,
            mode,
            features: record.features.iter(),
        }
    }

    fn residues(&self, feature: &Feature) -> Option<Residues> {
        match self.mode {
            Mode::Translation => feature
                .qualifiers
                .first("translation")
                .map(|t| Residues::Protein(t.to_string())),
            Mode::Nucleotide => {
                let location = feature.parse_location().ok()?;
                let seq = location.extract(self.record.sequence.as_bytes())?;
                String::from_utf8(seq).ok().map(Residues::Nucleotide)
            }
        }
    }
}

impl<'r> Iterator for Extractor<'r> {
    type Item = ExtractedSequence;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(feature) = self.features.next() {
            if !feature.is_cds() {
                continue;
            }
            let product = feature.qualifiers.first("product").unwrap_or("");
            if is_excluded(product) {
                continue;
            }
            if let Some(residues) = self.residues(feature) {
                let gene = feature.qualifiers.first("gene").unwrap_or(UNKNOWN_GENE);
                return Some(ExtractedSequence::new(
                    gene,
                    self.record.id(),
                    self.file,
                    residues,
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::model::FeatureKind;
    use crate::model::Locus;

    fn cds(location: &str, qualifiers: &[(&str, &str)]) -> Feature {
        let mut feature = Feature::new(FeatureKind::Cds, location);
        feature.qualifiers = qualifiers.iter().cloned().collect();
        feature
    }

    fn record(features: Vec<Feature>) -> GenomeRecord {
        let mut record = GenomeRecord::new(Locus::new("NC_000001"));
        record.accessions.push(String::from("NC_000001"));
        record.sequence = String::from("ATGGCCTAAGGGCATTTT");
        record.features = features;
        record
    }

    #[test]
    fn hypothetical_product_is_excluded() {
        let r = record(vec![cds(
            "1..9",
            &[("product", "hypothetical protein"), ("translation", "MKT")],
        )]);
        assert_eq!(extract(&r, "x.gbff.gz", Mode::Translation).count(), 0);
        assert_eq!(extract(&r, "x.gbff.gz", Mode::Nucleotide).count(), 0);
    }

    #[test]
    fn exclusion_is_a_case_insensitive_substring_match() {
        assert!(is_excluded("Putative PSEUDOGENE fragment"));
        assert!(is_excluded("conserved Hypothetical-like protein"));
        assert!(is_excluded("nonhypothetical"));
        assert!(!is_excluded("DNA polymerase I"));
        assert!(!is_excluded(""));
    }

    #[test]
    fn functional_product_is_extracted() {
        let r = record(vec![cds(
            "1..9",
            &[
                ("product", "DNA polymerase"),
                ("gene", "polA"),
                ("translation", "MSTA"),
            ],
        )]);
        let seqs = extract(&r, "x.gbff.gz", Mode::Translation).collect::<Vec<_>>();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].gene(), "polA");
        assert_eq!(seqs[0].record(), "NC_000001");
        assert_eq!(seqs[0].file(), "x.gbff.gz");
        assert_eq!(seqs[0].residues(), &Residues::Protein(String::from("MSTA")));
        assert_eq!(seqs[0].label(), "polA_NC_000001_x.gbff.gz");
    }

    #[test]
    fn defaults_for_missing_qualifiers() {
        let r = record(vec![
            cds("1..9", &[("translation", "MA")]),
            cds("1..9", &[("gene", "dnaA")]),
        ]);
        let seqs = extract(&r, "f", Mode::Translation).collect::<Vec<_>>();
        assert_eq!(seqs.len(), 1);
        assert_eq!(seqs[0].gene(), UNKNOWN_GENE);
    }

    #[test]
    fn first_values_are_used() {
        let r = record(vec![cds(
            "1..9",
            &[
                ("gene", "thrA"),
                ("gene", "thrA2"),
                ("translation", "MRV"),
                ("translation", "MKK"),
            ],
        )]);
        let seq = extract(&r, "f", Mode::Translation).next().unwrap();
        assert_eq!(seq.gene(), "thrA");
        assert_eq!(seq.residues().as_str(), "MRV");
    }

    #[test]
    fn non_cds_features_are_ignored() {
        let mut gene = cds("1..9", &[("gene", "polA"), ("translation", "M")]);
        gene.kind = FeatureKind::Gene;
        let r = record(vec![gene]);
        assert_eq!(extract(&r, "f", Mode::Translation).count(), 0);
    }

    #[test]
    fn nucleotide_mode_follows_location() {
        let r = record(vec![
            cds("1..9", &[("gene", "a")]),
            cds("complement(10..15)", &[("gene", "b")]),
            cds("join(1..3,16..18)", &[("gene", "c")]),
            cds("10..99", &[("gene", "d")]),
            cds("J00194.1:1..3", &[("gene", "e")]),
        ]);
        let seqs = extract(&r, "f", Mode::Nucleotide)
            .map(|s| (s.gene().to_string(), s.residues().as_str().to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            seqs,
            vec![
                (String::from("a"), String::from("ATGGCCTAA")),
                (String::from("b"), String::from("ATGCCC")),
                (String::from("c"), String::from("ATGTTT")),
            ]
        );
    }

    #[test]
    fn extraction_is_deterministic() {
        let r = record(vec![
            cds("1..9", &[("gene", "a"), ("translation", "MA")]),
            cds("1..9", &[("gene", "b"), ("translation", "MB")]),
        ]);
        let first = extract(&r, "f", Mode::Translation).collect::<Vec<_>>();
        let second = extract(&r, "f", Mode::Translation).collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first[0].gene(), "a");
        assert_eq!(first[1].gene(), "b");
    }
}
