//! Command-line interface for exact-mapper.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **map**: Report every exact occurrence of each read in the references
//! - **summary**: List the reference sequences with lengths and checksums
//!
//! ## Usage
//!
//! ```text
//! # Map reads against a reference
//! exact-mapper map genome.fa reads.fq.gz
//!
//! # Stream reads from another tool, TSV output
//! zcat reads.fq.gz | exact-mapper --format tsv map genome.fa -
//!
//! # k-mer seeded search on 8 threads
//! exact-mapper map genome.fa reads.fq --strategy kmer --kmer-size 16 --threads 8
//!
//! # Reproduce the historical output
//! exact-mapper --format legacy map genome.fa reads.fq --compare legacy-sentinel
//! ```

use clap::{Parser, Subcommand};

pub mod map;
pub mod summary;

pub use crate::report::OutputFormat;

#[derive(Parser)]
#[command(name = "exact-mapper")]
#[command(version)]
#[command(about = "Find every exact occurrence of short reads in reference sequences")]
#[command(
    long_about = "exact-mapper loads reference sequences from a FASTA file and reports every offset at which each read of a FASTQ file occurs unchanged.\n\nThere is no scoring and no mismatch tolerance:\n- Reads are reported in input order\n- Matches within a read are ordered by reference, then offset\n- Gzipped inputs are read transparently"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map reads onto reference sequences by exact matching
    Map(map::MapArgs),

    /// Summarize the sequences of a reference FASTA
    Summary(summary::SummaryArgs),
}
