//! Reference loader for FASTA files using noodles.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)
//!
//! Only the first word of each header line becomes the sequence name.
//! Bases are kept exactly as written: no case folding, no alphabet checks.

use std::io::BufRead;
use std::path::Path;

use noodles::fasta;
use tracing::{info, warn};

use crate::catalog::store::SequenceStore;
use crate::core::sequence::Sequence;
use crate::parsing::{has_extension, open_input, without_compression, LoadError};

const FASTA_EXTENSIONS: [&str; 3] = ["fa", "fasta", "fna"];

/// Whether `path` has a FASTA extension, looking through `.gz`/`.bgz`
pub fn is_fasta_file(path: &Path) -> bool {
    has_extension(without_compression(path), &FASTA_EXTENSIONS)
}

/// Load every record of a FASTA file into a new store.
///
/// With `limit` set, loading stops with `LoadError::Capacity` as soon as the
/// file holds more than `limit` records.
///
/// # Errors
///
/// Returns `LoadError::Open` if the file cannot be opened, `LoadError::Malformed`
/// if a record cannot be parsed, `LoadError::Capacity` if the limit is
/// exceeded, or `LoadError::Empty` if the file holds no records.
pub fn load_references(path: &Path, limit: Option<usize>) -> Result<SequenceStore, LoadError> {
    let origin = path.display().to_string();

    if path.as_os_str() != "-" && !is_fasta_file(path) {
        warn!("{origin} does not end in .fa, .fasta or .fna; reading it as FASTA");
    }

    let reader = open_input(path).map_err(|source| LoadError::Open {
        origin: origin.clone(),
        source,
    })?;

    load_references_from_reader(reader, &origin, limit)
}

/// Load every record from an already opened FASTA stream.
///
/// `origin` identifies the stream in errors and log messages.
///
/// # Errors
///
/// See [`load_references`].
pub fn load_references_from_reader<R: BufRead>(
    reader: R,
    origin: &str,
    limit: Option<usize>,
) -> Result<SequenceStore, LoadError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut store = match limit {
        Some(limit) => SequenceStore::with_limit(limit),
        None => SequenceStore::new(),
    };

    for (i, result) in fasta_reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::Malformed {
            origin: origin.to_string(),
            record: i + 1,
            message: e.to_string(),
        })?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let bases = record.sequence().as_ref().to_vec();

        store
            .push(Sequence::new(name, bases))
            .map_err(|source| LoadError::Capacity {
                origin: origin.to_string(),
                record: i + 1,
                source,
            })?;
    }

    if store.is_empty() {
        return Err(LoadError::Empty {
            origin: origin.to_string(),
        });
    }

    info!(
        "{} sequences loaded from {origin} ({} bases)",
        store.len(),
        store.total_bases()
    );

    Ok(store)
}
