use crate::common::ShortString;

// -----------------------------------------------------------------------

/// The column where feature keys start in the feature table.
pub const FEATURE_INDENT: usize = 5;

/// Remove the trailing line terminator of `line`, if any.
pub fn trim_newline(line: &mut String) {
    let len = line.trim_end_matches(|c| c == '\n' || c == '\r').len();
    line.truncate(len);
}

/// Split a header line into its keyword and the rest of the line.
///
/// Returns `None` for continuation lines, which start with a space.
pub fn split_keyword(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(' ') || line.is_empty() {
        return None;
    }
    let end = memchr::memchr(b' ', line.as_bytes()).unwrap_or(line.len());
    Some((&line[..end], line[end..].trim()))
}

/// Check whether a feature table line opens a new feature block.
pub fn is_feature_start(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() > FEATURE_INDENT
        && bytes[..FEATURE_INDENT].iter().all(|&b| b == b' ')
        && bytes[FEATURE_INDENT] != b' '
}

/// Split the text of a qualifier line into the qualifier name and value.
///
/// The leading `/` must already have been removed. Flag qualifiers such
/// as `/pseudo` have no value.
pub fn split_qualifier(text: &str) -> (ShortString, Option<&str>) {
    match memchr::memchr(b'=', text.as_bytes()) {
        Some(i) => (ShortString::from(&text[..i]), Some(&text[i + 1..])),
        None => (ShortString::from(text), None),
    }
}

/// Check whether a raw qualifier value still waits for its closing quote.
pub fn is_open_quote<'a, I>(pieces: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let mut pieces = pieces.into_iter().peekable();
    let quoted = pieces.peek().map_or(false, |p| p.starts_with('"'));
    let quotes = pieces
        .map(|p| memchr::memchr_iter(b'"', p.as_bytes()).count())
        .sum::<usize>();
    quoted && quotes % 2 == 1
}

/// Strip the surrounding quotes of a qualifier value and unescape `""`.
pub fn unquote(raw: &str) -> String {
    match raw.strip_prefix('"') {
        Some(inner) => inner
            .strip_suffix('"')
            .unwrap_or(inner)
            .replace("\"\"", "\""),
        None => raw.to_string(),
    }
}
