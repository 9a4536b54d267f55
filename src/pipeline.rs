//! End-to-end processing of GenBank archives.
//!
//! The [`Pipeline`] parses every record of each archive, hands the
//! extracted sequences to a [`SequenceSink`], and counts codons over the
//! nucleotide sequence of the same coding sequences. Archives and records
//! are processed one at a time: stopping between two records always leaves
//! a valid, if partial, codon table.
//!
//! [`Pipeline`]: ./struct.Pipeline.html
//! [`SequenceSink`]: ./trait.SequenceSink.html

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;

use log::debug;
use log::info;
use log::warn;

use crate::codon::CodonTable;
use crate::error::Error;
use crate::extract::extract;
use crate::extract::ExtractedSequence;
use crate::extract::Mode;
use crate::fasta::FastaWriter;
use crate::model::GenomeRecord;
use crate::parser::SequentialParser;

/// The two magic bytes starting a gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
/// The configuration of a `Pipeline`.
pub struct Config {
    /// The kind of sequences handed to the sink.
    pub mode: Mode,
    /// The suffix of the archive names picked up by `Pipeline::process_dir`.
    pub suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            suffix: String::from(".gbff.gz"),
        }
    }
}

// ---------------------------------------------------------------------------

/// A destination for extracted sequences.
pub trait SequenceSink {
    fn consume(&mut self, sequence: ExtractedSequence) -> Result<(), Error>;
}

impl SequenceSink for Vec<ExtractedSequence> {
    fn consume(&mut self, sequence: ExtractedSequence) -> Result<(), Error> {
        self.push(sequence);
        Ok(())
    }
}

impl<W: Write> SequenceSink for FastaWriter<W> {
    fn consume(&mut self, sequence: ExtractedSequence) -> Result<(), Error> {
        self.write_sequence(&sequence)
    }
}

impl<S: SequenceSink + ?Sized> SequenceSink for &mut S {
    fn consume(&mut self, sequence: ExtractedSequence) -> Result<(), Error> {
        (**self).consume(sequence)
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug)]
/// A recoverable error encountered while processing an archive.
pub struct Warning {
    /// The name of the archive the error was found in.
    pub source: String,
    pub error: Error,
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}: {}", self.source, self.error)
    }
}

#[derive(Debug, Default)]
/// The results of a `Pipeline` run.
pub struct Summary {
    pub table: CodonTable,
    pub archives: usize,
    pub records: usize,
    pub extracted: usize,
    pub warnings: Vec<Warning>,
}

// ---------------------------------------------------------------------------

/// Open an archive, decompressing it on the fly if it is gzipped.
pub fn open_archive<P: AsRef<Path>>(path: P) -> std::io::Result<Box<dyn BufRead>> {
    let mut reader = File::open(path).map(BufReader::new)?;
    let gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if gzipped {
        let decoder = libflate::gzip::MultiDecoder::new(reader)?;
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Extracts coding sequences from archives and counts their codons.
pub struct Pipeline {
    config: Config,
    summary: Summary,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            summary: Summary::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the results accumulated so far.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Stop processing and return the accumulated results.
    pub fn finish(self) -> Summary {
        self.summary
    }

    /// Process a single record read from `source`.
    pub fn process_record<S>(
        &mut self,
        record: &GenomeRecord,
        source: &str,
        mut sink: S,
    ) -> Result<(), Error>
    where
        S: SequenceSink,
    {
        self.summary.records += 1;
        for sequence in extract(record, source, Mode::Nucleotide) {
            self.summary.table.add_sequence(sequence.residues().as_str());
            if self.config.mode == Mode::Nucleotide {
                self.summary.extracted += 1;
                sink.consume(sequence)?;
            }
        }
        if self.config.mode == Mode::Translation {
            for sequence in extract(record, source, Mode::Translation) {
                self.summary.extracted += 1;
                sink.consume(sequence)?;
            }
        }
        Ok(())
    }

    /// Process all the records of a decompressed stream.
    ///
    /// Damaged entries are recorded as warnings; only errors raised by the
    /// sink are returned.
    pub fn process_reader<B, S>(&mut self, reader: B, source: &str, mut sink: S) -> Result<(), Error>
    where
        B: BufRead,
        S: SequenceSink,
    {
        self.summary.archives += 1;
        for result in SequentialParser::new(reader) {
            match result {
                Ok(record) => {
                    debug!("{}: extracting from {}", source, record.id());
                    self.process_record(&record, source, &mut sink)?;
                }
                Err(error) => self.warn(source, error),
            }
        }
        Ok(())
    }

    /// Process a single archive file.
    ///
    /// Sequences are labeled with the file name of `path`. An archive that
    /// cannot be opened is recorded as a warning.
    pub fn process_archive<P, S>(&mut self, path: P, sink: S) -> Result<(), Error>
    where
        P: AsRef<Path>,
        S: SequenceSink,
    {
        let path = path.as_ref();
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!("Processing {}...", source);
        match open_archive(path) {
            Ok(reader) => self.process_reader(reader, &source, sink),
            Err(error) => {
                self.warn(&source, Error::from(error));
                Ok(())
            }
        }
    }

    /// Process every archive of `dir` whose name ends with the configured suffix.
    ///
    /// Archives are processed in lexicographic order of their names.
    pub fn process_dir<P, S>(&mut self, dir: P, mut sink: S) -> Result<(), Error>
    where
        P: AsRef<Path>,
        S: SequenceSink,
    {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.ends_with(&self.config.suffix));
            if matches && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        for path in paths {
            self.process_archive(&path, &mut sink)?;
        }
        Ok(())
    }

    fn warn(&mut self, source: &str, error: Error) {
        let warning = Warning {
            source: source.to_string(),
            error,
        };
        warn!("{}", warning);
        self.summary.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {

    use std::io::Cursor;

    use super::*;
    use crate::extract::Residues;

    const TWO_GENES: &str = concat!(
        "LOCUS       NC_000001                 18 bp    DNA     linear   BCT 01-JAN-2020\n",
        "ACCESSION   NC_000001\n",
        "VERSION     NC_000001.1\n",
        "FEATURES             Location/Qualifiers\n",
        "     CDS             1..9\n",
        "                     /gene=\"polA\"\n",
        "                     /product=\"DNA polymerase\"\n",
        "                     /translation=\"MA*\"\n",
        "     CDS             complement(10..18)\n",
        "                     /product=\"hypothetical protein\"\n",
        "                     /translation=\"MK*\"\n",
        "ORIGIN\n",
        "        1 atggcctaag ggcattta\n",
        "//\n",
    );

    #[test]
    fn translation_mode_tallies_nucleotides() {
        let mut pipeline = Pipeline::new(Config::default());
        let mut sink = Vec::new();
        pipeline
            .process_reader(Cursor::new(TWO_GENES), "x.gbff", &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].label(), "polA_NC_000001.1_x.gbff");
        assert_eq!(sink[0].residues(), &Residues::Protein(String::from("MA*")));

        let summary = pipeline.finish();
        assert_eq!(summary.archives, 1);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.extracted, 1);
        assert!(summary.warnings.is_empty());
        assert_eq!(summary.table.total(), 3);
        assert_eq!(summary.table.get("ATG"), Some(1));
        assert_eq!(summary.table.get("GCC"), Some(1));
        assert_eq!(summary.table.get("TAA"), Some(1));
    }

    #[test]
    fn nucleotide_mode_sinks_nucleotides() {
        let config = Config {
            mode: Mode::Nucleotide,
            ..Config::default()
        };
        let mut pipeline = Pipeline::new(config);
        let mut sink = Vec::new();
        pipeline
            .process_reader(Cursor::new(TWO_GENES), "x.gbff", &mut sink)
            .unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].residues().as_str(), "ATGGCCTAA");
        assert_eq!(pipeline.summary().table.total(), 3);
    }

    #[test]
    fn damaged_entries_become_warnings() {
        let txt = format!("{}{}", TWO_GENES, "LOCUS       truncated\nFEATURES\n");
        let mut pipeline = Pipeline::new(Config::default());
        let mut sink = Vec::new();
        pipeline
            .process_reader(Cursor::new(txt), "x.gbff", &mut sink)
            .unwrap();
        let summary = pipeline.finish();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].source, "x.gbff");
        assert_eq!(summary.warnings[0].error.line(), Some(15));
    }

    #[test]
    fn process_plain_archive() {
        let mut pipeline = Pipeline::new(Config::default());
        let mut sink = Vec::new();
        pipeline.process_archive("tests/ecoli.gbk", &mut sink).unwrap();
        assert_eq!(sink.len(), 3);
        assert_eq!(sink[0].file(), "ecoli.gbk");
        assert_eq!(pipeline.summary().records, 2);
    }

    #[test]
    fn process_gzip_directory() {
        let dir = tempfile::tempdir().unwrap();
        let text = std::fs::read("tests/ecoli.gbk").unwrap();
        let mut encoder = libflate::gzip::Encoder::new(Vec::new()).unwrap();
        encoder.write_all(&text).unwrap();
        let gz = encoder.finish().into_result().unwrap();
        std::fs::write(dir.path().join("ecoli.gbff.gz"), gz).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"LOCUS       X\n").unwrap();

        let mut pipeline = Pipeline::new(Config::default());
        let mut out = Vec::new();
        let mut fasta = FastaWriter::new(&mut out);
        pipeline.process_dir(dir.path(), &mut fasta).unwrap();
        let summary = pipeline.finish();
        assert_eq!(summary.archives, 1);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.extracted, 3);
        assert!(summary.warnings.is_empty());
        // 66 + 39 + 60 coding nucleotides
        assert_eq!(summary.table.total(), 22 + 13 + 20);
        assert!(summary.table.get("ATG").unwrap() >= 2);

        assert_eq!(fasta.count(), 3);
        fasta.flush().unwrap();
        drop(fasta);
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(">thrL_NC_000913.3_ecoli.gbff.gz\nMKRISTTITTTITITTGNGAG"));
    }

    #[test]
    fn damaged_entry_inside_gzip_archive() {
        let mut damaged = TWO_GENES.as_bytes().to_vec();
        let pos = damaged.iter().position(|&b| b == b'p').unwrap();
        damaged[pos] = 0xE9;
        let mut text = Vec::new();
        text.extend_from_slice(TWO_GENES.as_bytes());
        text.extend_from_slice(&damaged);
        text.extend_from_slice(TWO_GENES.as_bytes());

        let dir = tempfile::tempdir().unwrap();
        let mut encoder = libflate::gzip::Encoder::new(Vec::new()).unwrap();
        encoder.write_all(&text).unwrap();
        let gz = encoder.finish().into_result().unwrap();
        std::fs::write(dir.path().join("mixed.gbff.gz"), gz).unwrap();

        let mut pipeline = Pipeline::new(Config::default());
        let mut sink = Vec::new();
        pipeline.process_dir(dir.path(), &mut sink).unwrap();
        let summary = pipeline.finish();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].error.is_recoverable());
        assert_eq!(summary.warnings[0].error.line(), Some(15));
        assert_eq!(sink.len(), 2);
        assert_eq!(summary.table.total(), 6);
    }

    #[test]
    fn missing_archive_becomes_warning() {
        let mut pipeline = Pipeline::new(Config::default());
        pipeline
            .process_archive("tests/does-not-exist.gbff.gz", Vec::new())
            .unwrap();
        let summary = pipeline.finish();
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].source, "does-not-exist.gbff.gz");
        assert!(!summary.warnings[0].error.is_recoverable());
        assert_eq!(summary.table, CodonTable::new());
    }
}
