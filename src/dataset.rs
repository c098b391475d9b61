//! Labelled values consumed by chart factories and draw callbacks.

use crate::error::{Error, Result};

/// Ordered `(label, value)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Dataset {
    /// Empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel label and value lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the lengths differ.
    pub fn from_parts<S: Into<String>>(labels: Vec<S>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(Error::DataLengthMismatch { labels: labels.len(), values: values.len() });
        }
        Ok(Self { labels: labels.into_iter().map(Into::into).collect(), values })
    }

    /// Append one entry.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: f64) -> Self {
        self.push(label, value);
        self
    }

    /// Append one entry.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Labels in order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Values in order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dataset has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest value, `None` when empty.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Iterate over `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut dataset = Self::new();
        for (label, value) in iter {
            dataset.push(label, value);
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_mismatch() {
        let result = Dataset::from_parts(vec!["a", "b"], vec![1.0]);
        assert!(matches!(result, Err(Error::DataLengthMismatch { labels: 2, values: 1 })));
    }

    #[test]
    fn test_collect_and_totals() {
        let data: Dataset = [("a", 1.0), ("b", 3.0)].into_iter().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.total(), 4.0);
        assert_eq!(data.max_value(), Some(3.0));
        assert_eq!(data.iter().next(), Some(("a", 1.0)));
    }

    #[test]
    fn test_empty() {
        let data = Dataset::new();
        assert!(data.is_empty());
        assert_eq!(data.max_value(), None);
    }
}
