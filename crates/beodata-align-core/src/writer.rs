//! Output writer.
//!
//! Extended rows are written in the aligned-corpus convention: all ids,
//! then all texts, separated by single spaces, one row per line. With
//! `E` input editions each line has `2 * (E + 1)` fields.

use std::io::{self, Write};

use crate::aligned::FIELD_SEPARATOR;
use crate::models::ExtendedRow;

/// Format one row as a line, without the trailing newline.
pub fn format_row(row: &ExtendedRow) -> String {
    let mut line = String::new();
    for (n, field) in row.ids().chain(row.texts()).enumerate() {
        if n > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(field);
    }
    line
}

/// Writes rows to any sink as they are produced.
pub struct RowWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> RowWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn write_row(&mut self, row: &ExtendedRow) -> io::Result<()> {
        writeln!(self.out, "{}", format_row(row))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
