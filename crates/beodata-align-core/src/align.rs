//! Cross-edition token alignment.
//!
//! Merges a fine-grained token stream into an existing N-way row
//! alignment, attributing zero, one or many tokens to each row.
//!
//! # Algorithm
//!
//! A single forward pass over the rows with one cursor `c` into the
//! tokens. `c` never moves backwards, so a token claimed by one row can
//! never be claimed by a later one. For row `i` with anchor `a`:
//!
//! 1. `range_end` is the anchor of the first later row whose anchor
//!    differs from `a`, or [`PositionId::SENTINEL`] if there is none.
//!    Consecutive rows sharing an anchor (a gap run) therefore share one
//!    bound.
//! 2. Tokens below `a` are stepped over.
//! 3. A join row (some non-gap text contains `_`) claims every token in
//!    `[a, range_end)`. Any other row claims at most the next one.
//! 4. The claimed tokens become the new column: the first token's id and
//!    the surface texts joined with `_`. A row that claims nothing gets
//!    its own anchor id and the gap marker.
//!
//! Every input row yields exactly one output row.
//!
//! # Example
//!
//! ```rust
//! use beodata_align_core::align::align;
//! use beodata_align_core::models::{AlignedRow, Token};
//! use beodata_align_core::position::PositionId;
//!
//! let id = PositionId::parse("0001a1").unwrap();
//! let tokens = vec![Token::new(id, "", "Hwæt", "!")];
//! let rows = vec![AlignedRow::new(vec!["0001a1".into()], vec!["HWÆT:".into()]).unwrap()];
//!
//! let (out, summary) = align(&rows, &tokens);
//! assert_eq!(out[0].new_text, "Hwæt!");
//! assert_eq!(summary.claimed, 1);
//! ```

use crate::models::{AlignedRow, ExtendedRow, Token, GAP_MARKER, JOIN_SEPARATOR};
use crate::position::PositionId;

/// Counters describing one alignment run.
///
/// Tokens that no row claims are not emitted anywhere; they are counted
/// here by where they fell relative to the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignSummary {
    pub rows: usize,
    pub tokens: usize,
    pub claimed: usize,
    pub gap_rows: usize,
    pub join_rows: usize,
    /// Tokens below the first row's anchor.
    pub leading_unclaimed: usize,
    /// Tokens stepped over mid-run because the cursor fell behind an anchor.
    pub skipped_unclaimed: usize,
    /// Tokens left after the last row.
    pub trailing_unclaimed: usize,
    /// Index of the first unclaimed token, if any.
    pub first_unclaimed: Option<usize>,
}

impl AlignSummary {
    pub fn unclaimed(&self) -> usize {
        self.leading_unclaimed + self.skipped_unclaimed + self.trailing_unclaimed
    }
}

/// Streaming aligner. Yields one [`ExtendedRow`] per input row, in order.
///
/// Call [`Aligner::finish`] after draining it to get the run summary,
/// including any tokens left after the last row.
pub struct Aligner<'a> {
    rows: &'a [AlignedRow],
    tokens: &'a [Token],
    row: usize,
    cursor: usize,
    /// First row index past the current gap run, cached so each run is
    /// scanned once.
    run_end: usize,
    summary: AlignSummary,
}

impl<'a> Aligner<'a> {
    pub fn new(rows: &'a [AlignedRow], tokens: &'a [Token]) -> Self {
        Self {
            rows,
            tokens,
            row: 0,
            cursor: 0,
            run_end: 0,
            summary: AlignSummary {
                rows: rows.len(),
                tokens: tokens.len(),
                ..AlignSummary::default()
            },
        }
    }

    /// Current token cursor. Never decreases.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drain any remaining rows and return the summary.
    pub fn finish(mut self) -> AlignSummary {
        while self.next().is_some() {}
        let trailing = self.tokens.len() - self.cursor;
        if trailing > 0 {
            self.summary.trailing_unclaimed = trailing;
            self.summary.first_unclaimed.get_or_insert(self.cursor);
        }
        self.summary
    }

    /// Exclusive upper bound on the ids row `i` may claim.
    fn range_end(&mut self, i: usize, anchor: PositionId) -> PositionId {
        if self.run_end <= i {
            let mut j = i + 1;
            while j < self.rows.len() && self.rows[j].anchor() == anchor {
                j += 1;
            }
            self.run_end = j;
        }
        self.rows
            .get(self.run_end)
            .map(AlignedRow::anchor)
            .unwrap_or(PositionId::SENTINEL)
    }

    fn skip_below(&mut self, anchor: PositionId) {
        let start = self.cursor;
        while self.cursor < self.tokens.len() && self.tokens[self.cursor].id < anchor {
            self.cursor += 1;
        }
        let skipped = self.cursor - start;
        if skipped == 0 {
            return;
        }
        self.summary.first_unclaimed.get_or_insert(start);
        if self.row == 0 {
            self.summary.leading_unclaimed += skipped;
        } else {
            self.summary.skipped_unclaimed += skipped;
        }
    }

    fn claim(&mut self, range_end: PositionId, join: bool) -> std::ops::Range<usize> {
        let start = self.cursor;
        while self.cursor < self.tokens.len() && self.tokens[self.cursor].id < range_end {
            self.cursor += 1;
            if !join {
                break;
            }
        }
        start..self.cursor
    }
}

impl Iterator for Aligner<'_> {
    type Item = ExtendedRow;

    fn next(&mut self) -> Option<ExtendedRow> {
        let (rows, tokens) = (self.rows, self.tokens);
        let i = self.row;
        let row = rows.get(i)?;
        let anchor = row.anchor();
        let range_end = self.range_end(i, anchor);

        self.skip_below(anchor);
        let join = row.is_join();
        let claimed = self.claim(range_end, join);
        self.row += 1;

        let collected = &tokens[claimed.clone()];
        let (new_id, new_text) = match collected.first() {
            Some(first) => (first.id_string.clone(), join_surface(collected)),
            None => (row.anchor_id().to_string(), GAP_MARKER.to_string()),
        };

        self.summary.claimed += claimed.len();
        if claimed.is_empty() {
            self.summary.gap_rows += 1;
        }
        if join {
            self.summary.join_rows += 1;
        }

        Some(ExtendedRow {
            row: row.clone(),
            new_id,
            new_text,
            claimed,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len() - self.row;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Aligner<'_> {}

fn join_surface(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (n, token) in tokens.iter().enumerate() {
        if n > 0 {
            text.push(JOIN_SEPARATOR);
        }
        text.push_str(&token.surface_text);
    }
    text
}

/// Align everything at once.
pub fn align(rows: &[AlignedRow], tokens: &[Token]) -> (Vec<ExtendedRow>, AlignSummary) {
    let mut aligner = Aligner::new(rows, tokens);
    let out: Vec<ExtendedRow> = aligner.by_ref().collect();
    (out, aligner.finish())
}
