/// A single named sequence, either a reference or a read.
///
/// Bases are opaque bytes: case and alphabet are never validated or
/// normalized, so `acgt` and `ACGT` are different sequences as far as
/// matching is concerned. The length is always `bases.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    bases: Vec<u8>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bases: bases.into(),
        }
    }

    /// Record name (first word of the FASTA/FASTQ header line)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// MD5 of the uppercased bases, lowercase hex.
    ///
    /// Uses the same convention as the `M5` tag of SAM `@SQ` lines.
    #[must_use]
    pub fn md5(&self) -> String {
        let uppercase: Vec<u8> = self.bases.iter().map(u8::to_ascii_uppercase).collect();
        format!("{:x}", md5::compute(&uppercase))
    }
}
