//! # exact-mapper
//!
//! A library for mapping short sequencing reads onto reference sequences by
//! exact substring search.
//!
//! Every read is located at every position where it occurs, unchanged, in any
//! of the references. There is no scoring, no mismatch tolerance and no gapped
//! alignment: a read either occurs at an offset or it does not.
//!
//! ## Features
//!
//! - **Brute-force scan**: every offset of every reference, the reference behaviour
//! - **k-mer seeded search**: a hash index over reference k-mers with identical output
//! - **Legacy comparison**: opt-in parity with the historical NUL-terminated compare
//! - **Streaming**: reads are pulled lazily and matches are reported immediately
//! - **Parallel batches**: optional rayon pool with output identical to one thread
//!
//! ## Example
//!
//! ```rust,no_run
//! use exact_mapper::parsing::{fasta, fastq::ReadSource};
//! use exact_mapper::report::{reporter_for, OutputFormat};
//! use exact_mapper::{BruteForceMatcher, MapOptions, MappingRun};
//! use std::path::Path;
//!
//! let store = fasta::load_references(Path::new("ref.fa"), None).unwrap();
//! let matcher = BruteForceMatcher::new(&store);
//! let reads = ReadSource::open(Path::new("reads.fq")).unwrap();
//!
//! let mut reporter = reporter_for(OutputFormat::Tsv, std::io::stdout().lock());
//! let summary = MappingRun::new(&matcher, MapOptions::default())
//!     .run(reads, reporter.as_mut())
//!     .unwrap();
//! eprintln!("{} matches", summary.matches);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference sequence store and k-mer index
//! - [`core`]: Sequences, matches and search options
//! - [`matching`]: Matchers and the read loop
//! - [`parsing`]: FASTA and FASTQ loaders
//! - [`report`]: Match output formats
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use catalog::store::{CapacityError, SequenceStore};
pub use core::sequence::Sequence;
pub use core::types::*;
pub use matching::{
    BruteForceMatcher, KmerIndexMatcher, MapOptions, MapSummary, Matcher, MatchingConfig,
    MappingRun,
};
pub use parsing::{LoadError, ReadError};
