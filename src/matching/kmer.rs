use crate::catalog::index::{IndexError, KmerIndex};
use crate::catalog::store::SequenceStore;
use crate::core::sequence::Sequence;
use crate::core::types::Match;
use crate::matching::compare::exact_at;
use crate::matching::engine::{BruteForceMatcher, Matcher, Matches};

/// Exact matcher seeded from a k-mer index of the references.
///
/// The first k bases of a read select candidate positions from the index and
/// each candidate is confirmed with a full-length comparison. Since index
/// hits are already sorted by reference and offset, the output order is the
/// same as a brute-force scan. Reads shorter than k are scanned.
#[derive(Debug)]
pub struct KmerIndexMatcher<'s> {
    store: &'s SequenceStore,
    index: KmerIndex<'s>,
    fallback: BruteForceMatcher<'s>,
}

impl<'s> KmerIndexMatcher<'s> {
    /// Index every k-mer of `store`
    ///
    /// # Errors
    ///
    /// Returns `IndexError::ZeroKmerSize` if `k` is zero.
    pub fn build(store: &'s SequenceStore, k: usize) -> Result<Self, IndexError> {
        let index = KmerIndex::build(store, k)?;
        tracing::debug!("Indexed {} distinct {k}-mers", index.len());

        Ok(Self {
            store,
            index,
            fallback: BruteForceMatcher::new(store),
        })
    }

    pub fn k(&self) -> usize {
        self.index.k()
    }
}

impl Matcher for KmerIndexMatcher<'_> {
    fn store(&self) -> &SequenceStore {
        self.store
    }

    fn find_matches<'m>(&'m self, read: &'m Sequence) -> Matches<'m> {
        let k = self.index.k();
        if read.len() < k {
            return self.fallback.find_matches(read);
        }

        let store = self.store;
        let query = read.bases();
        let hits = self.index.lookup(&query[..k]);

        Box::new(hits.iter().filter_map(move |hit| {
            let reference = store.get(hit.reference_index)?;
            exact_at(query, reference.bases(), hit.offset).then(|| {
                Match::new(read.name(), hit.reference_index, reference.name(), hit.offset)
            })
        }))
    }
}
