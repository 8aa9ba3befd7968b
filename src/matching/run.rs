//! The read loop: pull reads, find their matches, hand them to a reporter.
//!
//! Reads are processed in input order and each read's matches are reported
//! before the next read's. With more than one thread, reads are matched in
//! batches on a rayon pool and reported afterwards in input order, so the
//! output is the same as a single-threaded run.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::sequence::Sequence;
use crate::core::types::Match;
use crate::matching::engine::Matcher;
use crate::parsing::ReadError;
use crate::report::Reporter;

/// Reads between progress messages in the historical tool
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Reads matched together per parallel batch
pub const DEFAULT_BATCH_SIZE: usize = 1024;

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Failed to write matches: {0}")]
    Report(#[from] io::Error),

    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Options for a mapping run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Worker threads; 1 keeps everything on the calling thread
    pub threads: usize,
    /// Reads per parallel batch (ignored with one thread)
    pub batch_size: usize,
    /// Log progress every this many reads, 0 to disable
    pub progress_interval: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Shared flag to stop a run between reads
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts for a finished (or cancelled) run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub references: usize,
    pub reads_processed: usize,
    pub reads_matched: usize,
    pub matches: usize,
    pub cancelled: bool,
}

impl MapSummary {
    fn record_read(&mut self, match_count: usize, progress_interval: usize) {
        self.reads_processed += 1;
        self.matches += match_count;
        if match_count > 0 {
            self.reads_matched += 1;
        }

        if progress_interval > 0 && self.reads_processed % progress_interval == 0 {
            debug!(
                "{} reads processed, {} matches so far",
                self.reads_processed, self.matches
            );
        }
    }
}

/// Drives a matcher over a stream of reads
pub struct MappingRun<'a> {
    matcher: &'a dyn Matcher,
    options: MapOptions,
    cancel: CancelFlag,
}

impl<'a> MappingRun<'a> {
    pub fn new(matcher: &'a dyn Matcher, options: MapOptions) -> Self {
        Self {
            matcher,
            options,
            cancel: CancelFlag::new(),
        }
    }

    /// Stop the run when `cancel` is set; checked before each read or batch
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Match every read and report its matches.
    ///
    /// A read error stops the run after all earlier reads have been reported.
    ///
    /// # Errors
    ///
    /// Returns `MapError::Read` for a malformed read, `MapError::Report` if the
    /// reporter fails, or `MapError::ThreadPool` if worker threads cannot start.
    pub fn run<I, R>(&self, reads: I, reporter: &mut R) -> Result<MapSummary, MapError>
    where
        I: IntoIterator<Item = Result<Sequence, ReadError>>,
        R: Reporter + ?Sized,
    {
        let mut summary = MapSummary {
            references: self.matcher.store().len(),
            ..MapSummary::default()
        };

        if self.options.threads > 1 {
            self.run_batched(reads, reporter, &mut summary)?;
        } else {
            self.run_sequential(reads, reporter, &mut summary)?;
        }

        reporter.finish()?;

        if summary.cancelled {
            info!("Run cancelled after {} reads", summary.reads_processed);
        }
        info!(
            "{} reads processed, {} with matches, {} matches",
            summary.reads_processed, summary.reads_matched, summary.matches
        );

        Ok(summary)
    }

    fn run_sequential<I, R>(
        &self,
        reads: I,
        reporter: &mut R,
        summary: &mut MapSummary,
    ) -> Result<(), MapError>
    where
        I: IntoIterator<Item = Result<Sequence, ReadError>>,
        R: Reporter + ?Sized,
    {
        for read in reads {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let read = read?;
            let mut count = 0;
            for hit in self.matcher.find_matches(&read) {
                reporter.report(&hit)?;
                count += 1;
            }
            summary.record_read(count, self.options.progress_interval);
        }

        Ok(())
    }

    fn run_batched<I, R>(
        &self,
        reads: I,
        reporter: &mut R,
        summary: &mut MapSummary,
    ) -> Result<(), MapError>
    where
        I: IntoIterator<Item = Result<Sequence, ReadError>>,
        R: Reporter + ?Sized,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .build()?;
        let batch_size = self.options.batch_size.max(1);
        let mut reads = reads.into_iter();

        debug!(
            "Matching on {} threads in batches of {batch_size} reads",
            self.options.threads
        );

        loop {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                return Ok(());
            }

            let (batch, failure) = next_batch(&mut reads, batch_size);
            if batch.is_empty() && failure.is_none() {
                return Ok(());
            }

            let matcher = self.matcher;
            let results: Vec<Vec<Match<'_>>> = pool.install(|| {
                batch
                    .par_iter()
                    .map(|read| matcher.find_matches(read).collect::<Vec<_>>())
                    .collect()
            });

            for hits in &results {
                for hit in hits {
                    reporter.report(hit)?;
                }
                summary.record_read(hits.len(), self.options.progress_interval);
            }

            // Everything before the bad record has been reported
            if let Some(e) = failure {
                return Err(e.into());
            }
        }
    }
}

/// Pull up to `batch_size` reads, stopping early at the first error
fn next_batch<I>(reads: &mut I, batch_size: usize) -> (Vec<Sequence>, Option<ReadError>)
where
    I: Iterator<Item = Result<Sequence, ReadError>>,
{
    let mut batch = Vec::with_capacity(batch_size);

    for read in reads.by_ref() {
        match read {
            Ok(read) => {
                batch.push(read);
                if batch.len() == batch_size {
                    break;
                }
            }
            Err(e) => return (batch, Some(e)),
        }
    }

    (batch, None)
}
