use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::SequenceStore;
use crate::cli::OutputFormat;
use crate::parsing::fasta::load_references;

#[derive(Args)]
pub struct SummaryArgs {
    /// Reference FASTA file (optionally gzipped)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Fail if the reference holds more than this many sequences
    #[arg(long)]
    pub max_references: Option<usize>,
}

pub fn run(args: SummaryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let store = load_references(&args.reference, args.max_references).with_context(|| {
        format!(
            "Failed to load reference sequences from {}",
            args.reference.display()
        )
    })?;

    if verbose {
        eprintln!("Loaded {} sequences from {}", store.len(), args.reference.display());
    }

    match format {
        // The legacy format only covers matches
        OutputFormat::Text | OutputFormat::Legacy => print_text_summary(&store),
        OutputFormat::Json => print_json_summary(&store)?,
        OutputFormat::Tsv => print_tsv_summary(&store),
    }

    Ok(())
}

fn print_text_summary(store: &SequenceStore) {
    println!("Sequences: {}", store.len());
    println!("Total bases: {}", store.total_bases());

    if let Some(limit) = store.limit() {
        println!("Limit: {limit}");
    }

    if store.is_empty() {
        return;
    }

    println!();
    let name_width = store
        .iter()
        .map(|s| s.name().len())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    println!("{:>5}  {:<name_width$}  {:>12}  MD5", "Index", "Name", "Length");
    for (index, sequence) in store.iter().enumerate() {
        println!(
            "{:>5}  {:<name_width$}  {:>12}  {}",
            index,
            sequence.name(),
            sequence.len(),
            sequence.md5()
        );
    }
}

fn print_json_summary(store: &SequenceStore) -> anyhow::Result<()> {
    let sequences: Vec<_> = store
        .iter()
        .enumerate()
        .map(|(index, s)| {
            serde_json::json!({
                "index": index,
                "name": s.name(),
                "length": s.len(),
                "md5": s.md5(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "sequence_count": store.len(),
        "total_bases": store.total_bases(),
        "sequences": sequences,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(store: &SequenceStore) {
    println!("index\tname\tlength\tmd5");
    for (index, sequence) in store.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}",
            index,
            sequence.name(),
            sequence.len(),
            sequence.md5()
        );
    }
}
