//! Append-only record of indicator emissions.

use crate::core::{IndicatorError, IndicatorResult};

/// Emissions recorded by an indicator, in arrival order.
///
/// Entries are only ever appended; [`OutputSeries::clear`] is reserved for `reset`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSeries<T> {
    name: &'static str,
    values: Vec<T>,
}

impl<T> OutputSeries<T> {
    /// Creates an empty series for the named indicator.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            values: Vec::new(),
        }
    }

    /// Name of the owning indicator.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of recorded emissions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true before the first emission.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrowed view over the emissions.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Iterator over the emissions.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Clone> OutputSeries<T> {
    /// Owned copy of the emissions.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }

    /// Checked access by position.
    pub fn get(&self, index: usize) -> IndicatorResult<T> {
        self.values
            .get(index)
            .cloned()
            .ok_or(IndicatorError::OutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// The most recent emission.
    pub fn last(&self) -> Option<T> {
        self.values.last().cloned()
    }

    /// Records `value` and hands it back, for use as the tail of `next`.
    pub(crate) fn record(&mut self, value: T) -> T {
        self.values.push(value.clone());
        value
    }
}

impl<'a, T> IntoIterator for &'a OutputSeries<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
