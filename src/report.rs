//! Codon usage report in CSV format.

use std::io::Write;

use crate::codon::CodonTable;
use crate::error::Error;

/// The column names of the CSV report.
pub const CSV_HEADER: [&str; 2] = ["Codon", "Count"];

/// Write `table` as a two-column CSV report.
///
/// The header is followed by exactly 64 rows, one per codon, in
/// lexicographic order over the `ATGC` alphabet.
pub fn write_csv<W: Write>(table: &CodonTable, writer: W) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::default()
        .has_headers(true)
        .from_writer(writer);
    writer.write_record(&CSV_HEADER)?;
    for (codon, count) in table.iter() {
        writer.write_record(&[codon.to_string(), count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    fn render(table: &CodonTable) -> String {
        let mut out = Vec::new();
        write_csv(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_layout() {
        let table = CodonTable::new().tally(vec!["ATGGCCTAA", "AAAAAA"]);
        let text = render(&table);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 65);
        assert_eq!(lines[0], "Codon,Count");
        assert_eq!(lines[1], "AAA,2");
        assert_eq!(lines[2], "AAT,0");
        assert_eq!(lines[64], "CCC,0");
        assert!(lines.contains(&"ATG,1"));
    }

    #[test]
    fn empty_report() {
        let text = render(&CodonTable::new());
        assert_eq!(text.lines().count(), 65);
        assert!(text.lines().skip(1).all(|l| l.ends_with(",0")));
    }
}
