//! Rendering of matches as they are produced.
//!
//! A [`Reporter`] receives every match in the order the matcher yields it and
//! writes it straight through; nothing is buffered beyond the underlying
//! writer, so memory use does not grow with the number of reads.
//!
//! | Format | Output per match |
//! |--------|------------------|
//! | text   | `read r1 matched chr1 (#0) at offset 42` |
//! | tsv    | `r1\t0\tchr1\t42` (after a header line) |
//! | json   | `{"read":"r1","reference_index":0,"reference":"chr1","offset":42}` |
//! | legacy | `Match found in sequence 0.` |

use std::io::{self, Write};

use crate::core::types::Match;

/// Output format for matches and summaries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Tsv,
    /// One `Match found in sequence N.` line per match
    Legacy,
}

/// Sink for matches
pub trait Reporter {
    /// Render one match
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()>;

    /// Flush anything still pending once all reads are processed
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build the reporter for `format` writing to `writer`
pub fn reporter_for<'w, W: Write + 'w>(format: OutputFormat, writer: W) -> Box<dyn Reporter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(writer)),
        OutputFormat::Json => Box::new(JsonReporter::new(writer)),
        OutputFormat::Tsv => Box::new(TsvReporter::new(writer)),
        OutputFormat::Legacy => Box::new(LegacyReporter::new(writer)),
    }
}

/// Human-readable sentence per match
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    writer: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()> {
        writeln!(
            self.writer,
            "read {} matched {} (#{}) at offset {}",
            hit.read_name, hit.reference_name, hit.reference_index, hit.offset
        )
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Tab-separated rows under a single header line
#[derive(Debug)]
pub struct TsvReporter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> TsvReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "read\treference_index\treference\toffset")?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TsvReporter<W> {
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()> {
        self.write_header()?;
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}",
            hit.read_name, hit.reference_index, hit.reference_name, hit.offset
        )
    }

    fn finish(&mut self) -> io::Result<()> {
        // Header even when nothing matched
        self.write_header()?;
        self.writer.flush()
    }
}

/// One JSON object per line
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, hit)?;
        self.writer.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// The historical `Match found in sequence N.` line, reference index only
#[derive(Debug)]
pub struct LegacyReporter<W: Write> {
    writer: W,
}

impl<W: Write> LegacyReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Reporter for LegacyReporter<W> {
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()> {
        writeln!(self.writer, "Match found in sequence {}.", hit.reference_index)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps every reported match as `(read, reference_index, offset)`.
///
/// Meant for tests and small embedded uses; it retains everything.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub matches: Vec<(String, usize, usize)>,
}

impl Reporter for CollectingReporter {
    fn report(&mut self, hit: &Match<'_>) -> io::Result<()> {
        self.matches
            .push((hit.read_name.to_string(), hit.reference_index, hit.offset));
        Ok(())
    }
}
