use std::iter::FromIterator;

use fnv::FnvHashMap;

use crate::common::ShortString;

/// The qualifiers attached to a feature.
///
/// A qualifier name may appear more than once on the same feature: every
/// value is kept, in the order it was encountered. A name that was never
/// seen is distinguished from a name without values, and flag qualifiers
/// such as `/pseudo` are stored with an empty string value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Qualifiers {
    values: FnvHashMap<ShortString, Vec<String>>,
    count: usize,
}

impl Qualifiers {
    /// Create an empty set of qualifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for the qualifier `name`.
    pub fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<ShortString>,
        V: Into<String>,
    {
        self.values.entry(name.into()).or_default().push(value.into());
        self.count += 1;
    }

    /// Get all the values of the qualifier `name`, in encounter order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Get the first value of the qualifier `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Check whether the qualifier `name` was given at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over the qualifier names and their values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The total number of qualifier values, repeats included.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<N, V> FromIterator<(N, V)> for Qualifiers
where
    N: Into<ShortString>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut qualifiers = Qualifiers::new();
        for (name, value) in iter {
            qualifiers.push(name, value);
        }
        qualifiers
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn repeated_values_keep_order() {
        let q: Qualifiers = vec![
            ("db_xref", "GeneID:1"),
            ("gene", "thrL"),
            ("db_xref", "UniProtKB:P0AD86"),
        ]
        .into_iter()
        .collect();
        assert_eq!(q.len(), 3);
        assert_eq!(
            q.get("db_xref").unwrap(),
            &["GeneID:1".to_string(), "UniProtKB:P0AD86".to_string()][..]
        );
        assert_eq!(q.first("db_xref"), Some("GeneID:1"));
    }

    #[test]
    fn absent_and_flag_qualifiers() {
        let mut q = Qualifiers::new();
        assert!(q.is_empty());
        q.push("pseudo", "");
        assert!(q.contains("pseudo"));
        assert_eq!(q.first("pseudo"), Some(""));
        assert!(!q.contains("product"));
        assert_eq!(q.get("product"), None);
    }
}
