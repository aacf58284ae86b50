//! Human-readable table output.

use crate::error::Result;
use crate::output::{OutputWriter, Row};
use std::io::Write;

/// Column-aligned table writer.
///
/// Rows are buffered so column widths can be computed before printing.
pub struct TableWriter<W: Write> {
    out: W,
    rows: Vec<Vec<String>>,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
        }
    }
}

impl<W: Write, R: Row> OutputWriter<R> for TableWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        self.rows
            .push(R::HEADERS.iter().map(|h| (*h).to_string()).collect());
        Ok(())
    }

    fn write_row(&mut self, row: &R) -> Result<()> {
        self.rows.push(row.cells());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                self.rows
                    .iter()
                    .filter_map(|cells| cells.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for cells in &self.rows {
            let line = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(self.out, "{}", line.trim_end())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::output::DistrictRow;

    #[test]
    fn test_table_aligns_columns() {
        let mut buf = Vec::new();
        {
            let mut writer = TableWriter::new(&mut buf);
            OutputWriter::<DistrictRow>::write_header(&mut writer).unwrap();
            writer
                .write_row(&DistrictRow {
                    name: "Nakapiripirit".to_string(),
                    latitude: 1.9167,
                    longitude: 34.7833,
                })
                .unwrap();
            writer
                .write_row(&DistrictRow {
                    name: "Gulu".to_string(),
                    latitude: 2.7747,
                    longitude: 32.299,
                })
                .unwrap();
            OutputWriter::<DistrictRow>::finalize(&mut writer).unwrap();
        }

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name           latitude"));
        assert!(lines[2].starts_with("Gulu           2.7747"));
    }
}
