use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};

use crate::cli::OutputFormat;
use crate::core::types::{ComparePolicy, Strategy, DEFAULT_KMER_SIZE};
use crate::matching::run::{DEFAULT_BATCH_SIZE, DEFAULT_PROGRESS_INTERVAL};
use crate::matching::{build_matcher, MapOptions, MappingRun, MatchingConfig};
use crate::parsing::fasta::load_references;
use crate::parsing::fastq::ReadSource;
use crate::report::reporter_for;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Scan every offset of every reference
    #[default]
    BruteForce,
    /// Seed candidates from a k-mer index (exact comparison only)
    Kmer,
}

#[derive(Args)]
pub struct MapArgs {
    /// Reference FASTA file (optionally gzipped)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Reads FASTQ file (optionally gzipped), or '-' for stdin
    #[arg(required = true)]
    pub reads: PathBuf,

    /// How a read is compared against a reference window
    #[arg(long, value_enum, default_value = "exact")]
    pub compare: ComparePolicy,

    /// Disable the first-base check before full comparison
    #[arg(long)]
    pub no_first_base_filter: bool,

    /// Search strategy
    #[arg(long, value_enum, default_value = "brute-force")]
    pub strategy: StrategyArg,

    /// Seed length for the k-mer strategy
    #[arg(long, default_value_t = DEFAULT_KMER_SIZE)]
    pub kmer_size: usize,

    /// Fail if the reference holds more than this many sequences
    #[arg(long)]
    pub max_references: Option<usize>,

    /// Worker threads for matching
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Reads matched together per batch when using several threads
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Log progress every N reads (shown with --verbose, 0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: usize,
}

impl MapArgs {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::BruteForce => Strategy::BruteForce,
            StrategyArg::Kmer => Strategy::Kmer { k: self.kmer_size },
        }
    }

    fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            policy: self.compare,
            first_base_filter: !self.no_first_base_filter,
        }
    }

    fn map_options(&self) -> MapOptions {
        MapOptions {
            threads: self.threads.max(1),
            batch_size: self.batch_size.max(1),
            progress_interval: self.progress_interval,
        }
    }
}

pub fn run(args: MapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = load_references(&args.reference, args.max_references).with_context(|| {
        format!(
            "Failed to load reference sequences from {}",
            args.reference.display()
        )
    })?;

    if verbose {
        eprintln!(
            "Reference: {} sequences, {} bases",
            store.len(),
            store.total_bases()
        );
    }

    let strategy = args.strategy();
    let matcher = build_matcher(&store, strategy, args.matching_config())
        .with_context(|| format!("Failed to prepare the {strategy} matcher"))?;

    let reads = ReadSource::open(&args.reads)
        .with_context(|| format!("Failed to open reads from {}", args.reads.display()))?;
    if verbose {
        eprintln!("Reads: {} ({strategy}, {} comparison)", reads.origin(), args.compare);
    }

    let stdout = io::stdout();
    let mut reporter = reporter_for(format, BufWriter::new(stdout.lock()));

    let summary = MappingRun::new(matcher.as_ref(), args.map_options())
        .run(reads, reporter.as_mut())
        .with_context(|| format!("Mapping stopped while reading {}", args.reads.display()))?;

    if format == OutputFormat::Json {
        eprintln!("{}", serde_json::to_string(&summary)?);
    } else {
        eprintln!(
            "{} sequences loaded, {} reads processed, {} matches found",
            summary.references, summary.reads_processed, summary.matches
        );
    }

    Ok(())
}
