//! Position identifiers.
//!
//! A [`PositionId`] names a point in the verse text as
//! `(line, half-line, offset)`, written canonically as a 4-digit
//! zero-padded line number, a half-line letter and a decimal offset:
//! `0001a1`, `0307b4`, `3182b12`.
//!
//! Ids order lexicographically over the triple with `a < b`. The
//! [`PositionId::SENTINEL`] value sorts after every id that [`parse`]
//! can produce and is used as the open upper bound of the last row.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Width of the zero-padded line field.
pub const LINE_WIDTH: usize = 4;

/// Which half of a verse line an id points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Half {
    A,
    B,
}

impl Half {
    /// Parse the single-letter half-line field (`a` or `b`).
    pub fn from_letter(letter: &str) -> Result<Self, PositionError> {
        match letter {
            "a" => Ok(Half::A),
            "b" => Ok(Half::B),
            other => Err(PositionError::Half(other.to_string())),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Half::A => 'a',
            Half::B => 'b',
        }
    }
}

/// A point in the verse text. Field order drives the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositionId {
    line: u32,
    half: Half,
    offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position id is empty")]
    Empty,
    #[error("invalid line field '{0}': expected {LINE_WIDTH} digits")]
    Line(String),
    #[error("invalid half-line field '{0}': expected 'a' or 'b'")]
    Half(String),
    #[error("invalid offset field '{0}': expected a positive integer")]
    Offset(String),
}

impl PositionId {
    /// Greater than every id [`parse`] can return: parsed lines never
    /// exceed four digits.
    pub const SENTINEL: PositionId = PositionId {
        line: u32::MAX,
        half: Half::B,
        offset: u32::MAX,
    };

    /// Build an id from already-separated fields.
    ///
    /// `line` must be at most four digits and `offset` must be positive.
    pub fn new(line: u32, half: Half, offset: u32) -> Result<Self, PositionError> {
        if line > 9999 {
            return Err(PositionError::Line(line.to_string()));
        }
        if offset == 0 {
            return Err(PositionError::Offset(offset.to_string()));
        }
        Ok(Self { line, half, offset })
    }

    /// Build an id from the three raw text fields of a token record.
    pub fn from_fields(line: &str, half: &str, offset: &str) -> Result<Self, PositionError> {
        let line = parse_line(line)?;
        let half = Half::from_letter(half)?;
        let offset = parse_offset(offset)?;
        Ok(Self { line, half, offset })
    }

    /// Parse the canonical form, e.g. `0001a1`.
    pub fn parse(raw: &str) -> Result<Self, PositionError> {
        if raw.is_empty() {
            return Err(PositionError::Empty);
        }
        // `get` keeps us from slicing through a multi-byte char.
        let line = raw
            .get(..LINE_WIDTH)
            .ok_or_else(|| PositionError::Line(raw.to_string()))?;
        let half = raw
            .get(LINE_WIDTH..LINE_WIDTH + 1)
            .ok_or_else(|| PositionError::Half(raw[LINE_WIDTH.min(raw.len())..].to_string()))?;
        let offset = &raw[LINE_WIDTH + 1..];
        Self::from_fields(line, half, offset)
    }

    pub fn sentinel() -> Self {
        Self::SENTINEL
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

fn parse_line(field: &str) -> Result<u32, PositionError> {
    if field.len() != LINE_WIDTH || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PositionError::Line(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| PositionError::Line(field.to_string()))
}

fn parse_offset(field: &str) -> Result<u32, PositionError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PositionError::Offset(field.to_string()));
    }
    match field.parse::<u32>() {
        Ok(0) | Err(_) => Err(PositionError::Offset(field.to_string())),
        Ok(n) => Ok(n),
    }
}

impl FromStr for PositionId {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}{}{}",
            self.line,
            self.half.letter(),
            self.offset,
            width = LINE_WIDTH
        )
    }
}

impl Serialize for PositionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
