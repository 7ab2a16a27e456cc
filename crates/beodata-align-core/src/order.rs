//! Ordering checks for aligner input.
//!
//! The aligner assumes tokens are strictly increasing by id and rows are
//! non-decreasing by anchor. It does not check; callers that want to fail
//! fast on unordered input run these first.

use thiserror::Error;

use crate::models::{AlignedRow, Token};
use crate::position::PositionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("token {index} has id {id}, not after previous id {previous}")]
    Tokens {
        index: usize,
        previous: PositionId,
        id: PositionId,
    },
    #[error("row {index} has anchor {anchor}, before previous anchor {previous}")]
    Rows {
        index: usize,
        previous: PositionId,
        anchor: PositionId,
    },
}

/// Tokens must never repeat or go backwards.
pub fn check_tokens(tokens: &[Token]) -> Result<(), OrderError> {
    for (index, pair) in tokens.windows(2).enumerate() {
        if pair[1].id <= pair[0].id {
            return Err(OrderError::Tokens {
                index: index + 1,
                previous: pair[0].id,
                id: pair[1].id,
            });
        }
    }
    Ok(())
}

/// Rows may repeat an anchor (gap runs) but never go backwards.
pub fn check_rows(rows: &[AlignedRow]) -> Result<(), OrderError> {
    for (index, pair) in rows.windows(2).enumerate() {
        if pair[1].anchor() < pair[0].anchor() {
            return Err(OrderError::Rows {
                index: index + 1,
                previous: pair[0].anchor(),
                anchor: pair[1].anchor(),
            });
        }
    }
    Ok(())
}
