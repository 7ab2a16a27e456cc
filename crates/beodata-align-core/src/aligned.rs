//! Reader for the space-separated N-way aligned corpus.
//!
//! A line holds `E` edition ids followed by `E` edition texts, separated
//! by single spaces. `@` in a text column marks a gap; `_` inside a text
//! marks that edition's own multi-token span.

use std::io::BufRead;

use crate::models::AlignedRow;
use crate::parse::{read_lines, LineFault, ParseMode, Parsed, ReadError};

pub const FIELD_SEPARATOR: char = ' ';

/// Read every row of an aligned corpus with `editions` editions.
pub fn read_aligned<R: BufRead>(
    reader: R,
    editions: usize,
    mode: ParseMode,
) -> Result<Parsed<AlignedRow>, ReadError> {
    read_lines(reader, mode, |line| parse_aligned_line(line, editions))
}

/// Parse one row. The field count must be exactly `2 * editions`.
pub fn parse_aligned_line(line: &str, editions: usize) -> Result<AlignedRow, LineFault> {
    let mut fields: Vec<String> = line.split(FIELD_SEPARATOR).map(str::to_string).collect();
    if editions == 0 || fields.len() != 2 * editions {
        return Err(LineFault::FieldCount {
            expected: (2 * editions).to_string(),
            found: fields.len(),
        });
    }
    let texts = fields.split_off(editions);
    Ok(AlignedRow::new(fields, texts)?)
}
