//! Output writer trait definition.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::envelope::ResultType;
use crate::output::{CsvWriter, JsonWriter, Row, TableWriter};
use std::io::Write;

/// Trait for writing result rows.
pub trait OutputWriter<R: Row> {
    /// Write the header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single row.
    fn write_row(&mut self, row: &R) -> Result<()>;

    /// Finalize the output (flush, close the document, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Render `rows` to `out` in `format`.
pub fn write_rows<R, W>(
    out: W,
    format: OutputFormat,
    result_type: ResultType,
    rows: &[R],
) -> Result<()>
where
    R: Row + Clone,
    W: Write,
{
    match format {
        OutputFormat::Table => drive(TableWriter::new(out), rows),
        OutputFormat::Csv => drive(CsvWriter::new(out), rows),
        OutputFormat::Json => drive(JsonWriter::new(out, result_type), rows),
    }
}

fn drive<R: Row, O: OutputWriter<R>>(mut writer: O, rows: &[R]) -> Result<()> {
    writer.write_header()?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finalize()
}
