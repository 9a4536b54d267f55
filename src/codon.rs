//! Codon usage tallying.
//!
//! Sequences are read in frame 0 only: they are split into non-overlapping
//! windows of three nucleotides starting at the first base, and the final
//! incomplete window (if any) is dropped. Windows containing anything else
//! than `A`, `T`, `G` or `C` (ambiguity codes, gaps) are not counted.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::iter::FromIterator;
use std::ops::AddAssign;
use std::ops::Index;
use std::str::FromStr;

use crate::error::InvalidValue;

/// The nucleotide alphabet, in the order used to enumerate codons.
pub const NUCLEOTIDES: [u8; 4] = *b"ATGC";

/// The number of distinct codons.
pub const CODONS: usize = 64;

#[inline]
fn nucleotide_index(n: u8) -> Option<usize> {
    match n.to_ascii_uppercase() {
        b'A' => Some(0),
        b'T' => Some(1),
        b'G' => Some(2),
        b'C' => Some(3),
        _ => None,
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One of the 64 nucleotide triplets over `{A, T, G, C}`.
pub struct Codon {
    index: u8,
}

impl Codon {
    /// Get the codon at the given position of the enumeration order.
    ///
    /// Returns `None` if `index` is not lower than 64.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CODONS {
            Some(Codon { index: index as u8 })
        } else {
            None
        }
    }

    /// Get the codon spelled by a window of three bases, ignoring case.
    pub fn from_bytes(window: &[u8]) -> Option<Self> {
        match window {
            &[a, b, c] => {
                let i = nucleotide_index(a)? * 16 + nucleotide_index(b)? * 4 + nucleotide_index(c)?;
                Some(Codon { index: i as u8 })
            }
            _ => None,
        }
    }

    /// Get the position of the codon in the enumeration order.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Get the three bases of the codon.
    pub fn bases(&self) -> [u8; 3] {
        let i = self.index as usize;
        [NUCLEOTIDES[i / 16], NUCLEOTIDES[(i / 4) % 4], NUCLEOTIDES[i % 4]]
    }

    /// Iterate over all codons, in lexicographic order over `ATGC`.
    pub fn all() -> impl Iterator<Item = Codon> + Clone {
        (0..CODONS as u8).map(|index| Codon { index })
    }
}

impl Display for Codon {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let bases = self.bases();
        for &b in bases.iter() {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl FromStr for Codon {
    type Err = InvalidValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codon::from_bytes(s.as_bytes()).ok_or_else(|| InvalidValue::from(s))
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// The number of occurrences of every codon.
///
/// The table always holds all 64 codons, starting from a count of zero.
pub struct CodonTable {
    counts: [u64; CODONS],
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CodonTable {
    /// Create a new table with all counts set to zero.
    pub fn new() -> Self {
        Self {
            counts: [0; CODONS],
        }
    }

    /// Count the codons of a single nucleotide sequence.
    ///
    /// The sequence is split into windows of three characters starting at
    /// the first one, and a trailing incomplete window is dropped. Windows
    /// with a character outside of `ATGC` are not counted.
    pub fn add_sequence<S: AsRef<str>>(&mut self, sequence: S) {
        let mut chars = sequence.as_ref().chars();
        while let (Some(a), Some(b), Some(c)) = (chars.next(), chars.next(), chars.next()) {
            if !(a.is_ascii() && b.is_ascii() && c.is_ascii()) {
                continue;
            }
            if let Some(codon) = Codon::from_bytes(&[a as u8, b as u8, c as u8]) {
                self.counts[codon.index()] += 1;
            }
        }
    }

    /// Count the codons of all `sequences`, and return the updated table.
    pub fn tally<I>(mut self, sequences: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sequence in sequences {
            self.add_sequence(sequence);
        }
        self
    }

    /// Add the counts of `other` to this table.
    pub fn merge(&mut self, other: &CodonTable) {
        for (count, n) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += n;
        }
    }

    /// Get the count of the given codon.
    pub fn count(&self, codon: Codon) -> u64 {
        self.counts[codon.index()]
    }

    /// Get the count of a codon given as text, if it is a valid codon.
    pub fn get(&self, codon: &str) -> Option<u64> {
        Codon::from_str(codon).ok().map(|c| self.count(c))
    }

    /// The total number of codons counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The number of entries in the table, which is always 64.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate over the codons and their counts, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Codon, u64)> + '_ {
        Codon::all().map(move |codon| (codon, self.count(codon)))
    }
}

impl Index<Codon> for CodonTable {
    type Output = u64;
    fn index(&self, codon: Codon) -> &u64 {
        &self.counts[codon.index()]
    }
}

impl AddAssign<&CodonTable> for CodonTable {
    fn add_assign(&mut self, other: &CodonTable) {
        self.merge(other);
    }
}

impl<S: AsRef<str>> Extend<S> for CodonTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for sequence in iter {
            self.add_sequence(sequence);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for CodonTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CodonTable::new().tally(iter)
    }
}
