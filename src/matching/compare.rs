//! Window comparison for a read placed at one reference offset.

use crate::core::types::ComparePolicy;

/// Compare `read` against `reference` starting at `offset` under `policy`.
///
/// Returns false if `offset` is past the end of the reference. Callers are
/// expected to reject empty reads before getting here; an empty read compares
/// equal everywhere under both policies.
#[inline]
pub fn matches_at(policy: ComparePolicy, read: &[u8], reference: &[u8], offset: usize) -> bool {
    match policy {
        ComparePolicy::Exact => exact_at(read, reference, offset),
        ComparePolicy::LegacySentinel => sentinel_at(read, reference, offset),
    }
}

/// Full-length comparison: every base of the read must equal the reference.
/// A read running past the end of the reference never matches.
#[inline]
pub fn exact_at(read: &[u8], reference: &[u8], offset: usize) -> bool {
    offset
        .checked_add(read.len())
        .and_then(|end| reference.get(offset..end))
        .is_some_and(|window| window == read)
}

/// Comparison that stops at the end of either sequence and counts as equal.
///
/// This is how comparing two NUL-terminated strings up to the first
/// terminator behaves: when the reference runs out first, only the
/// overlapping prefix of the read has been checked.
#[inline]
pub fn sentinel_at(read: &[u8], reference: &[u8], offset: usize) -> bool {
    reference
        .get(offset..)
        .is_some_and(|tail| read.iter().zip(tail).all(|(a, b)| a == b))
}
