//! JSON output format writer.

use crate::error::{Error, Result};
use crate::output::envelope::{EventType, JsonEnvelope, ResultType, RowsPayload};
use crate::output::{OutputWriter, Row};
use std::io::Write;

/// Writes all rows as one pretty-printed JSON envelope.
pub struct JsonWriter<W: Write, R> {
    out: W,
    result_type: ResultType,
    rows: Vec<R>,
}

impl<W: Write, R> JsonWriter<W, R> {
    /// Create a new JSON writer.
    pub const fn new(out: W, result_type: ResultType) -> Self {
        Self {
            out,
            result_type,
            rows: Vec::new(),
        }
    }
}

impl<W: Write, R: Row + Clone> OutputWriter<R> for JsonWriter<W, R> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_row(&mut self, row: &R) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let envelope = JsonEnvelope::new(
            EventType::Result,
            RowsPayload {
                result_type: self.result_type,
                count: self.rows.len(),
                rows: &self.rows,
            },
        );
        serde_json::to_writer_pretty(&mut self.out, &envelope)
            .map_err(|source| Error::OutputSerialize { source })?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Write a single JSON envelope followed by a newline.
pub fn write_envelope<T: serde::Serialize>(
    mut out: impl Write,
    envelope: &JsonEnvelope<T>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, envelope)
        .map_err(|source| Error::OutputSerialize { source })?;
    writeln!(out)?;
    Ok(())
}
