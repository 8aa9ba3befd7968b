use tracing::warn;

use crate::catalog::index::IndexError;
use crate::catalog::store::SequenceStore;
use crate::core::sequence::Sequence;
use crate::core::types::{ComparePolicy, Match, Strategy};
use crate::matching::compare::matches_at;
use crate::matching::kmer::KmerIndexMatcher;

/// Lazy stream of matches for one read
pub type Matches<'m> = Box<dyn Iterator<Item = Match<'m>> + 'm>;

/// Finds every occurrence of a read in a sequence store.
///
/// Implementations must produce exactly the same matches in exactly the same
/// order: references in store order, ascending offset within a reference.
/// A zero-length read never matches, and a read longer than a reference never
/// matches that reference.
pub trait Matcher: Sync {
    /// The references being searched
    fn store(&self) -> &SequenceStore;

    /// Stream the matches of `read`
    fn find_matches<'m>(&'m self, read: &'m Sequence) -> Matches<'m>;
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingConfig {
    /// How a read is compared with a reference window
    pub policy: ComparePolicy,
    /// Check the first base before comparing the whole window.
    /// Never changes results.
    pub first_base_filter: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            policy: ComparePolicy::Exact,
            first_base_filter: true,
        }
    }
}

/// Scans every candidate offset of every reference
#[derive(Debug, Clone, Copy)]
pub struct BruteForceMatcher<'s> {
    store: &'s SequenceStore,
    config: MatchingConfig,
}

impl<'s> BruteForceMatcher<'s> {
    /// Create a matcher with the default configuration
    pub fn new(store: &'s SequenceStore) -> Self {
        Self {
            store,
            config: MatchingConfig::default(),
        }
    }

    pub fn with_config(store: &'s SequenceStore, config: MatchingConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> MatchingConfig {
        self.config
    }

    /// Iterator over the matches of `read` without boxing
    pub fn scan<'m>(&'m self, read: &'m Sequence) -> BruteForceMatches<'m> {
        BruteForceMatches {
            store: self.store,
            read,
            config: self.config,
            reference_index: 0,
            offset: 0,
        }
    }
}

impl Matcher for BruteForceMatcher<'_> {
    fn store(&self) -> &SequenceStore {
        self.store
    }

    fn find_matches<'m>(&'m self, read: &'m Sequence) -> Matches<'m> {
        Box::new(self.scan(read))
    }
}

/// Scan state of [`BruteForceMatcher`]: the next reference and offset to try
#[derive(Debug)]
pub struct BruteForceMatches<'m> {
    store: &'m SequenceStore,
    read: &'m Sequence,
    config: MatchingConfig,
    reference_index: usize,
    offset: usize,
}

impl BruteForceMatches<'_> {
    /// Last offset worth trying in a reference of `reference_len` bases, or
    /// `None` when the read cannot match it at all.
    fn last_start(&self, reference_len: usize) -> Option<usize> {
        let read_len = self.read.len();

        if read_len == 0 || read_len > reference_len {
            return None;
        }

        match self.config.policy {
            ComparePolicy::Exact => Some(reference_len - read_len),
            // Overhanging reads are compared up to the end of the reference
            ComparePolicy::LegacySentinel => Some(reference_len - 1),
        }
    }
}

impl<'m> Iterator for BruteForceMatches<'m> {
    type Item = Match<'m>;

    fn next(&mut self) -> Option<Self::Item> {
        let (store, read) = (self.store, self.read);
        let query = read.bases();
        let first_base = *query.first()?;

        while let Some(reference) = store.get(self.reference_index) {
            let bases = reference.bases();

            if let Some(last_start) = self.last_start(bases.len()) {
                while self.offset <= last_start {
                    let offset = self.offset;
                    self.offset += 1;

                    if self.config.first_base_filter && bases[offset] != first_base {
                        continue;
                    }

                    if matches_at(self.config.policy, query, bases, offset) {
                        return Some(Match::new(
                            read.name(),
                            self.reference_index,
                            reference.name(),
                            offset,
                        ));
                    }
                }
            }

            self.reference_index += 1;
            self.offset = 0;
        }

        None
    }
}

/// Build the matcher for `strategy` over `store`.
///
/// The k-mer index only supports the exact policy; asking for it together
/// with the legacy policy falls back to brute force.
///
/// # Errors
///
/// Returns `IndexError` if the k-mer index cannot be built.
pub fn build_matcher<'s>(
    store: &'s SequenceStore,
    strategy: Strategy,
    config: MatchingConfig,
) -> Result<Box<dyn Matcher + 's>, IndexError> {
    if config.policy == ComparePolicy::LegacySentinel {
        warn!(
            "Using the legacy sentinel comparison: reads overhanging the end of a reference \
             are reported when the overlapping bases agree"
        );
    }

    match strategy {
        Strategy::BruteForce => Ok(Box::new(BruteForceMatcher::with_config(store, config))),
        Strategy::Kmer { .. } if config.policy != ComparePolicy::Exact => {
            warn!("k-mer index supports only exact comparison, falling back to brute force");
            Ok(Box::new(BruteForceMatcher::with_config(store, config)))
        }
        Strategy::Kmer { k } => Ok(Box::new(KmerIndexMatcher::build(store, k)?)),
    }
}
