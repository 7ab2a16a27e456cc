//! Reader for the pipe-delimited tokenized stream.
//!
//! Each record has 18 `|`-separated fields:
//!
//! | # | Field | # | Field |
//! |---|-------|---|-------|
//! | 0 | fitt id | 9 | plain text |
//! | 1 | paragraph id | 10 | post-punctuation |
//! | 2 | paragraph-first flag | 11 | syntax code |
//! | 3 | non-verse flag | 12 | parse code |
//! | 4 | line id (`0001`) | 13 | lemma |
//! | 5 | half-line (`a`/`b`) | 14 | part-of-speech code |
//! | 6 | token offset | 15 | inflection code |
//! | 7 | caesura code | 16 | gloss |
//! | 8 | pre-punctuation | 17 | length-marked form |
//!
//! The reader does not sort. Input order is trusted to already be the
//! token order.

use std::io::BufRead;

use crate::models::{Token, TokenAnnotation};
use crate::parse::{read_lines, LineFault, ParseMode, Parsed, ReadError};
use crate::position::PositionId;

pub const FIELD_DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 18;

const FITT_ID: usize = 0;
const LINE_ID: usize = 4;
const HALF_LINE: usize = 5;
const TOKEN_OFFSET: usize = 6;
const PRE_PUNC: usize = 8;
const POST_PUNC: usize = 10;
const LEMMA: usize = 13;
const POS: usize = 14;
const INFLECTION: usize = 15;
const GLOSS: usize = 16;
const WITH_LENGTH: usize = 17;

/// Read every token record from `reader`.
pub fn read_tokens<R: BufRead>(reader: R, mode: ParseMode) -> Result<Parsed<Token>, ReadError> {
    read_lines(reader, mode, parse_token_line)
}

/// Parse one record. Records with more than [`FIELD_COUNT`] fields are
/// accepted; the extras are ignored.
pub fn parse_token_line(line: &str) -> Result<Token, LineFault> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return Err(LineFault::FieldCount {
            expected: format!("at least {FIELD_COUNT}"),
            found: fields.len(),
        });
    }

    let id = PositionId::from_fields(fields[LINE_ID], fields[HALF_LINE], fields[TOKEN_OFFSET])?;
    let annotation = TokenAnnotation {
        fitt_id: fields[FITT_ID].to_string(),
        lemma: fields[LEMMA].to_string(),
        pos: fields[POS].to_string(),
        inflection: fields[INFLECTION].to_string(),
        gloss: fields[GLOSS].to_string(),
    };

    Ok(Token::new(id, fields[PRE_PUNC], fields[WITH_LENGTH], fields[POST_PUNC]).with_annotation(annotation))
}
