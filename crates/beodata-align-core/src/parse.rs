//! Shared parse policy for the line-oriented readers.
//!
//! Both input formats historically dropped malformed lines without a
//! trace. [`ParseMode::Lenient`] keeps that behaviour but records each
//! dropped line in [`Parsed::skipped`]; [`ParseMode::Strict`] fails on
//! the first one instead.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RowError;
use crate::position::PositionError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// Records read from one input, plus whatever was dropped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedLine>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// A line dropped in lenient mode. `line_number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: LineFault,
}

/// What was wrong with a malformed line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineFault {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: String, found: usize },
    #[error("{0}")]
    Position(#[from] PositionError),
    #[error("{0}")]
    Row(#[from] RowError),
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line_number}: {fault}")]
    Malformed {
        line_number: usize,
        fault: LineFault,
    },
}

/// Drive `parse_line` over every non-blank line of `reader`, applying
/// `mode` to the lines it rejects.
pub(crate) fn read_lines<R, T, F>(
    reader: R,
    mode: ParseMode,
    mut parse_line: F,
) -> Result<Parsed<T>, ReadError>
where
    R: BufRead,
    F: FnMut(&str) -> Result<T, LineFault>,
{
    let mut parsed = Parsed::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        match parse_line(&line) {
            Ok(record) => parsed.records.push(record),
            Err(fault) => match mode {
                ParseMode::Strict => return Err(ReadError::Malformed { line_number, fault }),
                ParseMode::Lenient => parsed.skipped.push(SkippedLine {
                    line_number,
                    reason: fault,
                }),
            },
        }
    }
    Ok(parsed)
}
