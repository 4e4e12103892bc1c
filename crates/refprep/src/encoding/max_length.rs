//! # Per-Dataset Label Width

use indexmap::IndexMap;

use crate::errors::{PreproError, PreproResult};

/// Default label widths for the known REFER datasets.
pub const DEFAULT_MAX_LENGTHS: &[(&str, usize)] = &[
    ("refcoco", 10),
    ("refclef", 10),
    ("refcoco+", 10),
    ("refcocog", 20),
    ("refgta", 20),
];

/// Lookup table of ``{ dataset -> max label length }``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxLengthTable {
    table: IndexMap<String, usize>,
}

impl Default for MaxLengthTable {
    fn default() -> Self {
        DEFAULT_MAX_LENGTHS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for MaxLengthTable {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            table: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl MaxLengthTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Add (or replace) a dataset's default.
    pub fn with_entry<S: Into<String>>(
        mut self,
        dataset: S,
        max_length: usize,
    ) -> Self {
        self.table.insert(dataset.into(), max_length);
        self
    }

    /// Look up a dataset's default.
    pub fn get(
        &self,
        dataset: &str,
    ) -> Option<usize> {
        self.table.get(dataset).copied()
    }

    /// Resolve the max length for a dataset.
    ///
    /// ## Arguments
    /// * `dataset` - the dataset name.
    /// * `max_length` - an explicit override; wins over the table.
    ///
    /// ## Returns
    /// The max length, or an error if neither source has one, or it is 0.
    pub fn resolve(
        &self,
        dataset: &str,
        max_length: Option<usize>,
    ) -> PreproResult<usize> {
        let max_length = match max_length {
            Some(len) => len,
            None => self
                .get(dataset)
                .ok_or_else(|| PreproError::UnknownMaxLength {
                    dataset: dataset.to_string(),
                })?,
        };

        if max_length == 0 {
            return Err(PreproError::InvalidMaxLength);
        }
        Ok(max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = MaxLengthTable::default();

        assert_eq!(table.resolve("refcoco", None).unwrap(), 10);
        assert_eq!(table.resolve("refcoco+", None).unwrap(), 10);
        assert_eq!(table.resolve("refclef", None).unwrap(), 10);
        assert_eq!(table.resolve("refcocog", None).unwrap(), 20);
        assert_eq!(table.resolve("refgta", None).unwrap(), 20);
    }

    #[test]
    fn test_override() {
        let table = MaxLengthTable::default();
        assert_eq!(table.resolve("refcoco", Some(15)).unwrap(), 15);
        assert_eq!(table.resolve("mystery", Some(7)).unwrap(), 7);
    }

    #[test]
    fn test_unknown_and_invalid() {
        let table = MaxLengthTable::empty().with_entry("tiny", 0);

        assert!(matches!(
            table.resolve("refcoco", None),
            Err(PreproError::UnknownMaxLength { dataset }) if dataset == "refcoco"
        ));
        assert!(matches!(
            table.resolve("tiny", None),
            Err(PreproError::InvalidMaxLength)
        ));
        assert!(matches!(
            table.resolve("refcoco", Some(0)),
            Err(PreproError::InvalidMaxLength)
        ));
    }
}
