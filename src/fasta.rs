//! Reading and writing of extracted sequences in FASTA format.
//!
//! Both directions go through [`bio::io::fasta`]: the writer emits one
//! unwrapped entry per sequence, and the reader accepts sequences wrapped
//! over several lines.
//!
//! [`bio::io::fasta`]: https://docs.rs/bio/latest/bio/io/fasta/index.html

use std::io::Read;
use std::io::Write;

use bio::io::fasta;

use crate::codon::CodonTable;
use crate::error::Error;
use crate::extract::ExtractedSequence;

/// A writer emitting one two-line FASTA entry per sequence.
pub struct FastaWriter<W: Write> {
    writer: fasta::Writer<W>,
    count: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: fasta::Writer::new(writer),
            count: 0,
        }
    }

    /// Write a single entry with the given header and sequence.
    pub fn write(&mut self, header: &str, sequence: &str) -> Result<(), Error> {
        self.writer.write(header, None, sequence.as_bytes())?;
        self.count += 1;
        Ok(())
    }

    /// Write an extracted sequence, using its label as the header.
    pub fn write_sequence(&mut self, sequence: &ExtractedSequence) -> Result<(), Error> {
        self.write(&sequence.label(), sequence.residues().as_str())
    }

    /// The number of entries written so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Count the codons of every sequence of a FASTA file.
///
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, which makes
/// the codon window containing them invalid.
pub fn tally_fasta<R: Read>(reader: R) -> Result<CodonTable, Error> {
    let mut table = CodonTable::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record?;
        table.add_sequence(String::from_utf8_lossy(record.seq()));
    }
    Ok(table)
}
