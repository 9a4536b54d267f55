//! *Rust data structures and parser for [GenBank] flat files, with coding
//! sequence extraction and codon usage tallying.*
//!
//! [GenBank]: https://www.ncbi.nlm.nih.gov/genbank/
//!
//! # 🔌 Usage
//!
//! The `gbcodon::parse` function can be used to obtain an iterator over the
//! records of a GenBank file (such as the `*_genomic.gbff.gz` files of the
//! NCBI Assembly database). Damaged records are yielded as errors, and the
//! parser simply moves on to the next record.
//!
//! ```rust
//! extern crate gbcodon;
//!
//! let f = std::fs::File::open("tests/ecoli.gbk")
//!    .map(std::io::BufReader::new)
//!    .unwrap();
//!
//! for r in gbcodon::parse(f) {
//!    let record = r.unwrap();
//!    // ... process the GenBank record ...
//! }
//! ```
//!
//! Coding sequences are then extracted with [`extract::extract`], and their
//! codons counted with a [`codon::CodonTable`]:
//!
//! ```rust
//! use gbcodon::codon::CodonTable;
//! use gbcodon::extract::Mode;
//!
//! let f = std::fs::File::open("tests/ecoli.gbk")
//!    .map(std::io::BufReader::new)
//!    .unwrap();
//!
//! let mut table = CodonTable::new();
//! for record in gbcodon::parse(f).filter_map(Result::ok) {
//!     for cds in gbcodon::extract::extract(&record, "ecoli.gbk", Mode::Nucleotide) {
//!         table.add_sequence(cds.residues().as_str());
//!     }
//! }
//! assert_eq!(table.len(), 64);
//! ```
//!
//! ## 📦 Decoding Gzip
//!
//! The [`pipeline::open_archive`] function detects Gzip archives and
//! decodes them with [`libflate`], a pure Rust implementation. The
//! [`pipeline::Pipeline`] type takes care of the whole process, from a
//! directory of archives to a codon table.
//!
//! # 📝 Features
//!
//! ## `smartstring`
//!
//! _**enabled** by default_.
//!
//! Use [`smartstring`] to store short strings such as qualifier names
//! inline, avoiding a heap allocation per qualifier.
//!
//! ## `cli`
//!
//! _**enabled** by default_.
//!
//! Build the `gbcodon` command line program.
//!
//! ## 📜 License
//!
//! This library is provided under the open-source
//! [MIT license](https://choosealicense.com/licenses/mit/).
//!
//! [`libflate`]: https://docs.rs/libflate/
//! [`smartstring`]: https://docs.rs/smartstring/
//! [`extract::extract`]: ./extract/fn.extract.html
//! [`codon::CodonTable`]: ./codon/struct.CodonTable.html
//! [`pipeline::open_archive`]: ./pipeline/fn.open_archive.html
//! [`pipeline::Pipeline`]: ./pipeline/struct.Pipeline.html

extern crate bio;
extern crate chrono;
extern crate csv;
extern crate fnv;
extern crate libflate;
extern crate log;
extern crate memchr;
#[cfg(feature = "smartstring")]
extern crate smartstring;
extern crate thiserror;

pub mod codon;
pub mod common;
pub mod error;
pub mod extract;
pub mod fasta;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;

#[doc(inline)]
pub use self::parser::Parser;

use std::io::BufRead;

/// Parse a GenBank flat file.
///
/// # Example:
/// ```rust,no_run
/// let f = std::fs::File::open("GCF_000005845.2_ASM584v2_genomic.gbff.gz").unwrap();
/// let dec = libflate::gzip::MultiDecoder::new(f).unwrap();
/// let mut parser = gbcodon::parse(std::io::BufReader::new(dec));
///
/// println!("{:#?}", parser.next())
/// ```
pub fn parse<B: BufRead>(reader: B) -> Parser<B> {
    Parser::new(reader)
}
