//! Core data types for exact read mapping.
//!
//! - [`Sequence`](sequence::Sequence): a named run of bases, for references
//!   and reads alike
//! - [`Match`](types::Match): one occurrence of a read in a reference
//! - [`ComparePolicy`](types::ComparePolicy) and [`Strategy`](types::Strategy):
//!   how matches are searched for
//!
//! ## Offsets
//!
//! Offsets are zero-based positions in the reference bases. With the exact
//! policy a match at offset `k` for a read of length `n` always satisfies
//! `k + n <= reference.len()`.

pub mod sequence;
pub mod types;
