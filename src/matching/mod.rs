//! Exact read matching.
//!
//! - [`Matcher`]: the search seam; given a read, stream every match
//! - [`BruteForceMatcher`]: scans every offset of every reference (default)
//! - [`KmerIndexMatcher`]: seeds candidates from a k-mer index, then verifies
//! - [`MappingRun`]: the read loop feeding a [`Reporter`](crate::report::Reporter)
//!
//! ## Ordering
//!
//! Every matcher yields matches with references in load order and offsets
//! ascending within a reference, so strategies can be swapped without
//! changing the output.
//!
//! ## Comparison policies
//!
//! | Policy | A match at offset `k` means |
//! |--------|-----------------------------|
//! | `Exact` | `reference[k..k + n] == read` |
//! | `LegacySentinel` | the read and `reference[k..]` agree up to the end of the shorter one |
//!
//! Neither policy matches an empty read, or a read longer than the reference.
//!
//! ## Example
//!
//! ```rust
//! use exact_mapper::{BruteForceMatcher, Matcher, Sequence, SequenceStore};
//!
//! let store: SequenceStore = vec![
//!     Sequence::new("chr1", "AAAA"),
//!     Sequence::new("chr2", "TTAAAATT"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let matcher = BruteForceMatcher::new(&store);
//! let read = Sequence::new("read1", "AAAA");
//! let hits: Vec<_> = matcher.find_matches(&read).map(|m| m.position()).collect();
//! assert_eq!(hits, vec![(0, 0), (1, 2)]);
//! ```

pub mod compare;
pub mod engine;
pub mod kmer;
pub mod run;

pub use engine::{build_matcher, BruteForceMatcher, Matcher, MatchingConfig};
pub use kmer::KmerIndexMatcher;
pub use run::{CancelFlag, MapError, MapOptions, MapSummary, MappingRun};
