use std::collections::HashMap;

use thiserror::Error;

use super::store::SequenceStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("k-mer size must be at least 1")]
    ZeroKmerSize,
}

/// One occurrence of a k-mer in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerHit {
    pub reference_index: usize,
    pub offset: usize,
}

/// Hash index from every k-mer of every reference to its occurrences.
///
/// Keys borrow the reference bases, so the index lives no longer than the
/// store. Occurrence lists are built by walking references in load order and
/// offsets in increasing order, which makes each list sorted by
/// `(reference_index, offset)`.
#[derive(Debug)]
pub struct KmerIndex<'a> {
    k: usize,
    kmers: HashMap<&'a [u8], Vec<KmerHit>>,
}

impl<'a> KmerIndex<'a> {
    /// Index all k-mers of the store
    ///
    /// # Errors
    ///
    /// Returns `IndexError::ZeroKmerSize` if `k` is zero.
    pub fn build(store: &'a SequenceStore, k: usize) -> Result<Self, IndexError> {
        if k == 0 {
            return Err(IndexError::ZeroKmerSize);
        }

        let mut kmers: HashMap<&'a [u8], Vec<KmerHit>> = HashMap::new();

        for (reference_index, reference) in store.iter().enumerate() {
            // windows() yields nothing for references shorter than k
            for (offset, kmer) in reference.bases().windows(k).enumerate() {
                kmers.entry(kmer).or_default().push(KmerHit {
                    reference_index,
                    offset,
                });
            }
        }

        Ok(Self { k, kmers })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct k-mers
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// Occurrences of `kmer`, sorted by reference then offset.
    /// Empty if the k-mer never occurs or has the wrong length.
    pub fn lookup(&self, kmer: &[u8]) -> &[KmerHit] {
        self.kmers.get(kmer).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::Sequence;

    fn hits(index: &KmerIndex<'_>, kmer: &[u8]) -> Vec<(usize, usize)> {
        index
            .lookup(kmer)
            .iter()
            .map(|h| (h.reference_index, h.offset))
            .collect()
    }

    #[test]
    fn test_hits_are_sorted_by_reference_then_offset() {
        let store: SequenceStore = vec![
            Sequence::new("r0", "ACGTACGT"),
            Sequence::new("r1", "TTACGTT"),
        ]
        .into_iter()
        .collect();

        let index = KmerIndex::build(&store, 3).unwrap();
        assert_eq!(index.k(), 3);
        assert_eq!(hits(&index, b"ACG"), vec![(0, 0), (0, 4), (1, 2)]);
        assert_eq!(hits(&index, b"GTT"), vec![(1, 4)]);
        assert!(index.lookup(b"GGG").is_empty());
        assert!(index.lookup(b"AC").is_empty());
    }

    #[test]
    fn test_short_references_are_skipped() {
        let store: SequenceStore = vec![Sequence::new("tiny", "AC"), Sequence::new("r", "ACGT")]
            .into_iter()
            .collect();

        let index = KmerIndex::build(&store, 3).unwrap();
        assert_eq!(index.len(), 2); // ACG, CGT
        assert_eq!(hits(&index, b"ACG"), vec![(1, 0)]);
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let store = SequenceStore::new();
        assert_eq!(
            KmerIndex::build(&store, 0).unwrap_err(),
            IndexError::ZeroKmerSize
        );
    }
}
