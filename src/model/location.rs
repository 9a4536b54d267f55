use std::str::FromStr;

use crate::error::InvalidValue;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The location of a feature on the record sequence.
///
/// Coordinates are 1-based and inclusive, as written in the flat file.
pub enum Location {
    /// A single base (`467`) or a span of bases (`340..565`), possibly
    /// partial on either side (`<1..>888`).
    Range {
        start: usize,
        end: usize,
        partial_start: bool,
        partial_end: bool,
    },
    /// A site between two adjacent bases (`123^124`).
    Between(usize, usize),
    /// The reverse complement of the inner location.
    Complement(Box<Location>),
    /// Segments to be joined end to end into a contiguous sequence.
    Join(Vec<Location>),
    /// Segments in the given order, without implying they are joined.
    Order(Vec<Location>),
    /// A location on another record (`J00194.1:100..202`).
    Remote {
        accession: String,
        location: Box<Location>,
    },
}

impl Location {
    /// Get the sequence covered by this location on `sequence`.
    ///
    /// Returns `None` when the location cannot be resolved locally: a remote
    /// reference, a between-site, or coordinates outside of the sequence.
    pub fn extract(&self, sequence: &[u8]) -> Option<Vec<u8>> {
        match self {
            Location::Range { start, end, .. } => {
                if *start == 0 || start > end || *end > sequence.len() {
                    None
                } else {
                    Some(sequence[start - 1..*end].to_vec())
                }
            }
            Location::Complement(inner) => inner.extract(sequence).map(|s| reverse_complement(&s)),
            Location::Join(parts) | Location::Order(parts) => {
                let mut seq = Vec::new();
                for part in parts {
                    seq.extend(part.extract(sequence)?);
                }
                Some(seq)
            }
            Location::Between(_, _) | Location::Remote { .. } => None,
        }
    }
}

impl FromStr for Location {
    type Err = InvalidValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let mut parser = LocationParser {
            text: &text,
            pos: 0,
        };
        let location = parser
            .location()
            .ok_or_else(|| InvalidValue::from(s))?;
        if parser.pos != text.len() {
            return Err(InvalidValue::from(s));
        }
        Ok(location)
    }
}

// ---------------------------------------------------------------------------

/// A recursive descent parser over a whitespace-free location string.
struct LocationParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LocationParser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn location(&mut self) -> Option<Location> {
        if self.eat("complement(") {
            let inner = self.location()?;
            if !self.eat(")") {
                return None;
            }
            Some(Location::Complement(Box::new(inner)))
        } else if self.eat("join(") {
            self.list().map(Location::Join)
        } else if self.eat("order(") {
            self.list().map(Location::Order)
        } else {
            self.remote_or_span()
        }
    }

    fn list(&mut self) -> Option<Vec<Location>> {
        let mut parts = vec![self.location()?];
        while self.eat(",") {
            parts.push(self.location()?);
        }
        if self.eat(")") {
            Some(parts)
        } else {
            None
        }
    }

    fn remote_or_span(&mut self) -> Option<Location> {
        let rest = self.rest();
        let stop = rest.find(|c| c == ',' || c == ')').unwrap_or(rest.len());
        if let Some(colon) = rest[..stop].find(':') {
            let accession = rest[..colon].to_string();
            self.pos += colon + 1;
            let location = self.location()?;
            return Some(Location::Remote {
                accession,
                location: Box::new(location),
            });
        }
        self.span()
    }

    fn span(&mut self) -> Option<Location> {
        let partial_start = self.eat("<");
        let start = self.number()?;
        if self.eat("..") {
            let partial_end = self.eat(">");
            let end = self.number()?;
            Some(Location::Range {
                start,
                end,
                partial_start,
                partial_end,
            })
        } else if self.eat("^") {
            let end = self.number()?;
            Some(Location::Between(start, end))
        } else {
            let partial_end = self.eat(">");
            Some(Location::Range {
                start,
                end: start,
                partial_start,
                partial_end,
            })
        }
    }

    fn number(&mut self) -> Option<usize> {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let n = rest[..len].parse().ok()?;
        self.pos += len;
        Some(n)
    }
}

// ---------------------------------------------------------------------------

/// Reverse complement a nucleotide sequence, preserving IUPAC ambiguity codes.
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .rev()
        .map(|&b| match b.to_ascii_uppercase() {
            b'A' => b'T',
            b'T' | b'U' => b'A',
            b'G' => b'C',
            b'C' => b'G',
            b'R' => b'Y',
            b'Y' => b'R',
            b'K' => b'M',
            b'M' => b'K',
            b'B' => b'V',
            b'V' => b'B',
            b'D' => b'H',
            b'H' => b'D',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;

    fn range(start: usize, end: usize) -> Location {
        Location::Range {
            start,
            end,
            partial_start: false,
            partial_end: false,
        }
    }

    #[test]
    fn parse_simple_range() {
        let loc = Location::from_str("190..255").unwrap();
        assert_eq!(loc, range(190, 255));
    }

    #[test]
    fn parse_partial_range() {
        let loc = Location::from_str("<1..>888").unwrap();
        assert_eq!(
            loc,
            Location::Range {
                start: 1,
                end: 888,
                partial_start: true,
                partial_end: true
            }
        );
    }

    #[test]
    fn parse_nested() {
        let loc = Location::from_str("complement(join(3..5, 8..10))").unwrap();
        assert_eq!(
            loc,
            Location::Complement(Box::new(Location::Join(vec![range(3, 5), range(8, 10)])))
        );
    }

    #[test]
    fn parse_remote_and_between() {
        let loc = Location::from_str("join(J00194.1:100..202,1^2)").unwrap();
        match loc {
            Location::Join(parts) => {
                assert_eq!(
                    parts[0],
                    Location::Remote {
                        accession: String::from("J00194.1"),
                        location: Box::new(range(100, 202)),
                    }
                );
                assert_eq!(parts[1], Location::Between(1, 2));
            }
            other => panic!("unexpected location: {:?}", other),
        }
    }

    #[test]
    fn parse_invalid() {
        assert!(Location::from_str("join(1..3").is_err());
        assert!(Location::from_str("1..3)").is_err());
        assert!(Location::from_str("").is_err());
        assert!(Location::from_str("abc").is_err());
    }

    #[test]
    fn extract_forward_and_reverse() {
        let seq = b"ATGAAACCCGGGTTTTAG";
        let loc = Location::from_str("join(1..3,10..12)").unwrap();
        assert_eq!(loc.extract(seq).unwrap(), b"ATGGGG".to_vec());
        let loc = Location::from_str("complement(1..6)").unwrap();
        assert_eq!(loc.extract(seq).unwrap(), b"TTTCAT".to_vec());
    }

    #[test]
    fn extract_out_of_bounds() {
        let seq = b"ATGAAA";
        assert_eq!(Location::from_str("4..9").unwrap().extract(seq), None);
        assert_eq!(Location::from_str("X:1..3").unwrap().extract(seq), None);
    }
}
