//! CSV output format writer.

use crate::error::{Error, Result};
use crate::output::{OutputWriter, Row};
use std::io::Write;

/// CSV format output writer.
///
/// Values are written unrounded; the header row is always present.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer.
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(out),
        }
    }
}

impl<W: Write, R: Row> OutputWriter<R> for CsvWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(R::HEADERS)
            .map_err(|source| Error::CsvWrite { source })
    }

    fn write_row(&mut self, row: &R) -> Result<()> {
        self.writer
            .serialize(row)
            .map_err(|source| Error::CsvWrite { source })
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
