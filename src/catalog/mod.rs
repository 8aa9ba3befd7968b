//! Reference sequence storage and indexing.
//!
//! - [`store::SequenceStore`]: the ordered, write-once collection of loaded
//!   references. A reference's index is its position in the FASTA file.
//! - [`index::KmerIndex`]: hash index from reference k-mers to their
//!   occurrences, used by the k-mer search strategy.
//!
//! ## Example
//!
//! ```rust
//! use exact_mapper::catalog::store::SequenceStore;
//! use exact_mapper::Sequence;
//!
//! let mut store = SequenceStore::with_limit(10);
//! let idx = store.push(Sequence::new("chr1", "ACGTACGT")).unwrap();
//! assert_eq!(store.get(idx).unwrap().len(), 8);
//! ```

pub mod index;
pub mod store;
