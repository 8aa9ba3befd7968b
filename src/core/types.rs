use serde::Serialize;

/// A single occurrence of a read inside a reference.
///
/// Matches borrow the read and reference names and are handed to a reporter
/// as soon as they are found; nothing in the crate keeps them past a single
/// read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Match<'a> {
    /// Name of the read that matched
    #[serde(rename = "read")]
    pub read_name: &'a str,

    /// Index of the reference in the sequence store (load order)
    pub reference_index: usize,

    /// Name of the reference at `reference_index`
    #[serde(rename = "reference")]
    pub reference_name: &'a str,

    /// Zero-based start of the match within the reference bases
    pub offset: usize,
}

impl<'a> Match<'a> {
    pub fn new(
        read_name: &'a str,
        reference_index: usize,
        reference_name: &'a str,
        offset: usize,
    ) -> Self {
        Self {
            read_name,
            reference_index,
            reference_name,
            offset,
        }
    }

    /// `(reference_index, offset)`, the position of the match in the store
    pub fn position(&self) -> (usize, usize) {
        (self.reference_index, self.offset)
    }
}

/// How a read is compared against a reference window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ComparePolicy {
    /// Every symbol of the read must equal the reference over the full read length
    #[default]
    Exact,
    /// Comparison stops at the end of either sequence and counts as a match.
    ///
    /// Reproduces the historical tool, which compared NUL-terminated strings:
    /// a read hanging off the end of a reference matches if the overlapping
    /// part is equal.
    LegacySentinel,
}

impl std::fmt::Display for ComparePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::LegacySentinel => write!(f, "legacy-sentinel"),
        }
    }
}

/// Search strategy used to find matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Scan every offset of every reference
    #[default]
    BruteForce,
    /// Seed candidates from a hash index of reference k-mers
    Kmer { k: usize },
}

/// Default seed length for the k-mer strategy
pub const DEFAULT_KMER_SIZE: usize = 12;

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BruteForce => write!(f, "brute-force"),
            Self::Kmer { k } => write!(f, "kmer (k={k})"),
        }
    }
}
