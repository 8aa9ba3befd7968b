//! Streaming read source for FASTQ files using noodles.
//!
//! Reads are decoded one record at a time as the caller asks for them. The
//! quality line is parsed (the format requires it) but not kept.

use std::io::BufRead;
use std::path::Path;

use noodles::fastq;

use crate::core::sequence::Sequence;
use crate::parsing::{open_input, ReadError};

/// A single forward pass over the reads of a FASTQ stream.
///
/// Yields `Ok(Sequence)` per record. The first malformed record yields one
/// `Err` and ends the stream; records after it are never looked at.
pub struct ReadSource {
    reader: fastq::io::Reader<Box<dyn BufRead>>,
    origin: String,
    records_read: usize,
    finished: bool,
}

impl ReadSource {
    /// Open a FASTQ file (plain, gzip or bgzip), or stdin when `path` is `-`.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::Open` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, ReadError> {
        let origin = if path.as_os_str() == "-" {
            "stdin".to_string()
        } else {
            path.display().to_string()
        };

        let reader = open_input(path).map_err(|source| ReadError::Open {
            origin: origin.clone(),
            source,
        })?;

        Ok(Self::new(reader, origin))
    }

    /// Wrap an already opened FASTQ stream; `origin` names it in errors
    pub fn from_reader<R: BufRead + 'static>(reader: R, origin: impl Into<String>) -> Self {
        Self::new(Box::new(reader), origin.into())
    }

    fn new(reader: Box<dyn BufRead>, origin: String) -> Self {
        Self {
            reader: fastq::io::Reader::new(reader),
            origin,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records successfully decoded so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Error for the record currently being decoded
    fn malformed(&self, message: impl Into<String>) -> ReadError {
        ReadError::Malformed {
            origin: self.origin.clone(),
            record: self.records_read + 1,
            message: message.into(),
        }
    }
}

impl Iterator for ReadSource {
    type Item = Result<Sequence, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut record = fastq::Record::default();

        match self.reader.read_record(&mut record) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) if record.quality_scores().len() != record.sequence().len() => {
                self.finished = true;
                Some(Err(self.malformed(format!(
                    "sequence and quality lengths differ ({} vs {})",
                    record.sequence().len(),
                    record.quality_scores().len()
                ))))
            }
            Ok(_) => {
                self.records_read += 1;
                let name = String::from_utf8_lossy(record.name()).to_string();
                Some(Ok(Sequence::new(name, record.sequence().to_vec())))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(self.malformed(e.to_string())))
            }
        }
    }
}

impl std::fmt::Debug for ReadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadSource")
            .field("origin", &self.origin)
            .field("records_read", &self.records_read)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
