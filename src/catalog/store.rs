use thiserror::Error;

use crate::core::sequence::Sequence;

/// Adding a reference would exceed the configured store limit
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Too many reference sequences: limit of {limit} reached")]
pub struct CapacityError {
    pub limit: usize,
}

/// Ordered, write-once collection of reference sequences.
///
/// The index of a sequence is its load order and never changes. The store
/// owns every sequence it holds; there is no removal or update, so once it is
/// handed to a matcher it can be shared freely between threads.
#[derive(Debug, Default)]
pub struct SequenceStore {
    sequences: Vec<Sequence>,

    /// Maximum number of sequences, `None` for unbounded
    limit: Option<usize>,
}

impl SequenceStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses more than `limit` sequences
    pub fn with_limit(limit: usize) -> Self {
        Self {
            sequences: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Append a sequence and return its index.
    ///
    /// # Errors
    ///
    /// Returns `CapacityError` if the store already holds `limit` sequences.
    pub fn push(&mut self, sequence: Sequence) -> Result<usize, CapacityError> {
        if let Some(limit) = self.limit {
            if self.sequences.len() >= limit {
                return Err(CapacityError { limit });
            }
        }
        self.sequences.push(sequence);
        Ok(self.sequences.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Iterate sequences in load order
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    /// Sum of all reference lengths
    pub fn total_bases(&self) -> u64 {
        self.sequences.iter().map(|s| s.len() as u64).sum()
    }
}

impl FromIterator<Sequence> for SequenceStore {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        Self {
            sequences: iter.into_iter().collect(),
            limit: None,
        }
    }
}

impl<'a> IntoIterator for &'a SequenceStore {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}
