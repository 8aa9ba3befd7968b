//! Loaders that turn sequence files into [`Sequence`](crate::Sequence)s.
//!
//! - **FASTA** ([`fasta`]): reference sequences, loaded eagerly into a
//!   [`SequenceStore`](crate::SequenceStore)
//! - **FASTQ** ([`fastq`]): reads, streamed lazily one record at a time
//!
//! Both accept plain or gzip/bgzip compressed files, chosen by extension.
//!
//! ## Failure model
//!
//! A malformed record stops loading at that record. Neither loader attempts
//! to skip bad records or resynchronize; every error names the source and the
//! 1-based record number.
//!
//! ## Example
//!
//! ```rust,no_run
//! use exact_mapper::parsing::{fasta, fastq::ReadSource};
//! use std::path::Path;
//!
//! let store = fasta::load_references(Path::new("ref.fa.gz"), None).unwrap();
//! for read in ReadSource::open(Path::new("reads.fq")).unwrap() {
//!     let read = read.unwrap();
//!     println!("{} ({} bp)", read.name(), read.len());
//! }
//! ```

use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

use crate::catalog::store::CapacityError;

pub mod fasta;
pub mod fastq;

/// Failure to load the reference sequences
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open {origin}: {source}")]
    Open {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed reference record #{record} in {origin}: {message}")]
    Malformed {
        origin: String,
        record: usize,
        message: String,
    },

    #[error("Cannot load reference record #{record} from {origin}: {source}")]
    Capacity {
        origin: String,
        record: usize,
        #[source]
        source: CapacityError,
    },

    #[error("No sequences found in {origin}")]
    Empty { origin: String },
}

/// Failure to read the next read record
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Cannot open {origin}: {source}")]
    Open {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed read record #{record} in {origin}: {message}")]
    Malformed {
        origin: String,
        record: usize,
        message: String,
    },
}

/// Extensions marking gzip or bgzip compression
const COMPRESSED_EXTENSIONS: [&str; 2] = ["gz", "bgz"];

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Whether `path` names a gzip or bgzip compressed file
pub fn is_gzipped(path: &Path) -> bool {
    has_extension(path, &COMPRESSED_EXTENSIONS)
}

/// `path` with a trailing `.gz`/`.bgz` removed, for checking the inner extension
pub(crate) fn without_compression(path: &Path) -> &Path {
    if is_gzipped(path) {
        Path::new(path.file_stem().unwrap_or_default())
    } else {
        path
    }
}

/// Open a file for buffered reading, decompressing gzip/bgzip by extension.
/// `-` reads from stdin (uncompressed).
pub(crate) fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = std::fs::File::open(path)?;

    // MultiGzDecoder also handles bgzip, which is a series of gzip members
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("ref.fa.gz")));
        assert!(is_gzipped(Path::new("reads.fastq.bgz")));
        assert!(is_gzipped(Path::new("/data/READS.FQ.GZ")));

        assert!(!is_gzipped(Path::new("ref.fa")));
        assert!(!is_gzipped(Path::new("reads.fastq")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_without_compression() {
        assert_eq!(without_compression(Path::new("/data/ref.fa.gz")), Path::new("ref.fa"));
        assert_eq!(without_compression(Path::new("ref.fa")), Path::new("ref.fa"));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_input(Path::new("/nonexistent/reads.fq"));
        assert!(result.is_err());
    }
}
