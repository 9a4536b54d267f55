//! GenBank flat file parser implementation.
//!
//! The parser reads entries one after the other from any [`BufRead`]
//! implementor, and yields them in the order they appear in the source file.
//! A damaged entry is reported as an `Err` item, after which the parser
//! resumes with the next entry: only I/O errors end the iteration early.
//! Lines are read as bytes, so an entry containing invalid UTF-8 is skipped
//! like any other damaged entry.
//!
//! [`BufRead`]: https://doc.rust-lang.org/std/io/trait.BufRead.html

pub(crate) mod utils;

use std::io::BufRead;
use std::str::FromStr;

use log::debug;

use crate::common::ShortString;
use crate::error::Error;
use crate::model::Feature;
use crate::model::FeatureKind;
use crate::model::GenomeRecord;
use crate::model::Locus;
use crate::model::Qualifiers;

use self::utils::is_feature_start;
use self::utils::is_open_quote;
use self::utils::split_keyword;
use self::utils::split_qualifier;
use self::utils::trim_newline;
use self::utils::unquote;

// ---------------------------------------------------------------------------

/// A parser for GenBank flat files that parses entries sequentially.
pub struct SequentialParser<B: BufRead> {
    reader: B,
    bytes: Vec<u8>,
    buffer: String,
    line: usize,
    invalid_line: bool,
    pending: bool,
    finished: bool,
}

impl<B: BufRead> SequentialParser<B> {
    /// Create a new `SequentialParser` wrapping the given reader.
    pub fn new(reader: B) -> Self {
        Self {
            reader,
            bytes: Vec::new(),
            buffer: String::new(),
            line: 0,
            invalid_line: false,
            pending: false,
            finished: false,
        }
    }

    /// Parse a single entry from the given reader.
    pub fn parse_entry(reader: B) -> <Self as Iterator>::Item {
        let mut parser = Self::new(reader);
        parser
            .next()
            .unwrap_or_else(|| Err(Error::UnexpectedEof { line: parser.line + 1 }))
    }

    /// Get the number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next line into the buffer, returning `false` on EOF.
    ///
    /// A line that is not valid UTF-8 is decoded lossily and flagged with
    /// `invalid_line`, so that only the entry containing it is discarded.
    fn read_line(&mut self) -> std::io::Result<bool> {
        self.bytes.clear();
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.bytes)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        match std::str::from_utf8(&self.bytes) {
            Ok(text) => {
                self.invalid_line = false;
                self.buffer.push_str(text);
            }
            Err(_) => {
                self.invalid_line = true;
                self.buffer.push_str(&String::from_utf8_lossy(&self.bytes));
            }
        }
        trim_newline(&mut self.buffer);
        Ok(true)
    }

    fn next_entry(&mut self) -> Option<Result<GenomeRecord, Error>> {
        // skip everything until the next `LOCUS` line
        loop {
            if !self.pending {
                match self.read_line() {
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(Error::from(e)));
                    }
                    Ok(false) => {
                        self.finished = true;
                        return None;
                    }
                    Ok(true) => (),
                }
            }
            self.pending = false;
            if self.buffer.starts_with("LOCUS") {
                break;
            }
        }

        // feed lines to the builder until the entry terminator
        let mut builder = EntryBuilder::new(self.line, &self.buffer);
        let mut invalid = self.invalid_line;
        loop {
            match self.read_line() {
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::from(e)));
                }
                Ok(false) => {
                    self.finished = true;
                    return Some(Err(Error::UnexpectedEof { line: builder.start }));
                }
                Ok(true) if self.buffer.starts_with("//") => {
                    if invalid {
                        return Some(Err(Error::InvalidUtf8 { line: builder.start }));
                    }
                    return Some(builder.finish());
                }
                Ok(true) if self.buffer.starts_with("LOCUS") => {
                    self.pending = true;
                    return Some(Err(Error::UnexpectedEof { line: builder.start }));
                }
                Ok(true) => {
                    invalid |= self.invalid_line;
                    builder.feed(&self.buffer);
                }
            }
        }
    }
}

impl<B: BufRead> Iterator for SequentialParser<B> {
    type Item = Result<GenomeRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_entry();
        if let Some(Err(e)) = &item {
            debug!("skipping entry: {}", e);
        }
        item
    }
}

/// The parser type for the crate, used by `gbcodon::parse`.
pub type Parser<B> = SequentialParser<B>;

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The section of an entry the builder is currently reading.
enum Section {
    Definition,
    Accession,
    Features,
    Origin,
    Other,
}

/// A qualifier whose value may still continue on the next lines.
struct QualifierBuilder {
    name: ShortString,
    pieces: Vec<String>,
}

impl QualifierBuilder {
    fn finish(self, qualifiers: &mut Qualifiers) {
        // protein translations are wrapped without any separator
        let raw = if self.name.as_str() == "translation" {
            self.pieces.concat()
        } else {
            self.pieces.join(" ")
        };
        qualifiers.push(self.name, unquote(&raw));
    }
}

/// Incrementally builds a `GenomeRecord` from the lines of an entry.
struct EntryBuilder {
    start: usize,
    locus: Option<Locus>,
    record: GenomeRecord,
    section: Section,
    feature: Option<Feature>,
    qualifier: Option<QualifierBuilder>,
    error: Option<Error>,
}

impl EntryBuilder {
    fn new(start: usize, locus_line: &str) -> Self {
        let locus = Locus::from_str(locus_line).ok();
        let record = GenomeRecord::new(locus.clone().unwrap_or_else(|| Locus::new("")));
        Self {
            start,
            locus,
            record,
            section: Section::Other,
            feature: None,
            qualifier: None,
            error: None,
        }
    }

    fn feed(&mut self, line: &str) {
        if let Some((keyword, rest)) = split_keyword(line) {
            if self.section == Section::Features {
                self.flush_feature();
            }
            self.section = match keyword {
                "DEFINITION" => {
                    self.record.definition = Some(rest.to_string());
                    Section::Definition
                }
                "ACCESSION" => {
                    self.push_accessions(rest);
                    Section::Accession
                }
                "VERSION" => {
                    self.record.version = rest.split_whitespace().next().map(String::from);
                    Section::Other
                }
                "FEATURES" => Section::Features,
                "ORIGIN" => Section::Origin,
                _ => Section::Other,
            };
            return;
        }

        match self.section {
            Section::Definition => {
                if let Some(definition) = self.record.definition.as_mut() {
                    definition.push(' ');
                    definition.push_str(line.trim());
                }
            }
            Section::Accession => self.push_accessions(line),
            Section::Features => self.feed_feature(line),
            Section::Origin => {
                let residues = line
                    .chars()
                    .filter(char::is_ascii_alphabetic)
                    .map(|c| c.to_ascii_uppercase());
                self.record.sequence.extend(residues);
            }
            Section::Other => (),
        }
    }

    fn push_accessions(&mut self, text: &str) {
        self.record
            .accessions
            .extend(text.split_whitespace().map(String::from));
    }

    fn feed_feature(&mut self, line: &str) {
        if is_feature_start(line) {
            self.flush_feature();
            let mut tokens = line.split_whitespace();
            let kind = tokens.next().map(FeatureKind::from_str);
            if let Some(Ok(kind)) = kind {
                let location = tokens.collect::<Vec<_>>().concat();
                self.feature = Some(Feature::new(kind, location));
            }
            return;
        }

        let text = line.trim();
        let feature = match self.feature.as_mut() {
            Some(feature) => feature,
            None => return,
        };

        if let Some(qualifier) = self.qualifier.as_mut() {
            if is_open_quote(&qualifier.pieces) || !text.starts_with('/') {
                qualifier.pieces.push(text.to_string());
                return;
            }
        }

        if let Some(text) = text.strip_prefix('/') {
            if let Some(previous) = self.qualifier.take() {
                previous.finish(&mut feature.qualifiers);
            }
            let (name, value) = split_qualifier(text);
            match value {
                Some(value) => {
                    self.qualifier = Some(QualifierBuilder {
                        name,
                        pieces: vec![value.to_string()],
                    });
                }
                None => feature.qualifiers.push(name, ""),
            }
        } else if feature.qualifiers.is_empty() {
            // the location itself can be wrapped before the first qualifier
            feature.location.push_str(text);
        }
    }

    fn flush_feature(&mut self) {
        let mut feature = match self.feature.take() {
            Some(feature) => feature,
            None => return,
        };
        if let Some(qualifier) = self.qualifier.take() {
            qualifier.finish(&mut feature.qualifiers);
        }
        if feature.qualifiers.is_empty() {
            if self.error.is_none() {
                self.error = Some(Error::EmptyFeature {
                    key: feature.kind.to_string(),
                    line: self.start,
                });
            }
        } else {
            self.record.features.push(feature);
        }
    }

    fn finish(mut self) -> Result<GenomeRecord, Error> {
        self.flush_feature();
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.locus.is_none() {
            match self.record.accessions.first() {
                Some(accession) => self.record.locus = Locus::new(accession.as_str()),
                None => return Err(Error::MissingAccession { line: self.start }),
            }
        }
        if self.record.id().is_empty() {
            return Err(Error::MissingAccession { line: self.start });
        }
        Ok(self.record)
    }
}
