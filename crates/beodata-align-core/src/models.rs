//! Core data models shared by the readers, the aligner and the writer.
//!
//! All of these are plain value records. The aligner works over slices of
//! them with integer cursors and never mutates its inputs.

use std::ops::Range;

use serde::Serialize;

use crate::position::{PositionError, PositionId};

/// Text value meaning "this edition has no data at this position".
pub const GAP_MARKER: &str = "@";

/// Joins the parts of a multi-token span inside a single text field.
pub const JOIN_SEPARATOR: char = '_';

/// Lexical annotations carried through from the tokenized stream.
///
/// The aligner ignores these; they ride along so exports can show what
/// each claimed token is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenAnnotation {
    pub fitt_id: String,
    pub lemma: String,
    pub pos: String,
    pub inflection: String,
    pub gloss: String,
}

/// One token of the fine-grained tokenized stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: PositionId,
    /// Canonical fixed-width form of `id`, e.g. `0001a1`.
    pub id_string: String,
    /// Pre-punctuation + length-marked form + post-punctuation, with
    /// internal spaces replaced by [`JOIN_SEPARATOR`].
    pub surface_text: String,
    pub annotation: TokenAnnotation,
}

impl Token {
    pub fn new(id: PositionId, pre_punc: &str, with_length: &str, post_punc: &str) -> Self {
        Self {
            id,
            id_string: id.to_string(),
            surface_text: surface_text(pre_punc, with_length, post_punc),
            annotation: TokenAnnotation::default(),
        }
    }

    pub fn with_annotation(mut self, annotation: TokenAnnotation) -> Self {
        self.annotation = annotation;
        self
    }
}

/// Build a single-field surface form from the three text parts.
pub fn surface_text(pre_punc: &str, with_length: &str, post_punc: &str) -> String {
    let mut text = String::with_capacity(pre_punc.len() + with_length.len() + post_punc.len());
    text.push_str(pre_punc);
    text.push_str(with_length);
    text.push_str(post_punc);
    text.replace(' ', &JOIN_SEPARATOR.to_string())
}

/// One row of the pre-existing N-way alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    edition_ids: Vec<String>,
    edition_texts: Vec<String>,
    anchor: PositionId,
}

/// Why a set of columns cannot form an [`AlignedRow`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("a row needs at least one edition")]
    NoEditions,
    #[error("{ids} edition ids but {texts} edition texts")]
    ColumnMismatch { ids: usize, texts: usize },
    #[error("invalid anchor id: {0}")]
    Anchor(#[from] PositionError),
}

impl AlignedRow {
    /// Build a row, parsing the anchor from the first edition id.
    pub fn new(edition_ids: Vec<String>, edition_texts: Vec<String>) -> Result<Self, RowError> {
        if edition_ids.len() != edition_texts.len() {
            return Err(RowError::ColumnMismatch {
                ids: edition_ids.len(),
                texts: edition_texts.len(),
            });
        }
        let first = edition_ids.first().ok_or(RowError::NoEditions)?;
        let anchor = PositionId::parse(first)?;
        Ok(Self {
            edition_ids,
            edition_texts,
            anchor,
        })
    }

    pub fn edition_ids(&self) -> &[String] {
        &self.edition_ids
    }

    pub fn edition_texts(&self) -> &[String] {
        &self.edition_texts
    }

    /// The position parsed from the primary edition's id.
    pub fn anchor(&self) -> PositionId {
        self.anchor
    }

    /// The primary edition's id exactly as it appeared in the input.
    pub fn anchor_id(&self) -> &str {
        &self.edition_ids[0]
    }

    pub fn edition_count(&self) -> usize {
        self.edition_ids.len()
    }

    /// A join row has at least one non-gap text spanning several tokens.
    pub fn is_join(&self) -> bool {
        self.edition_texts
            .iter()
            .any(|t| t != GAP_MARKER && t.contains(JOIN_SEPARATOR))
    }
}

/// An aligned row with the merged edition appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedRow {
    pub row: AlignedRow,
    pub new_id: String,
    pub new_text: String,
    /// Indices into the token sequence claimed by this row. Always
    /// contiguous because the cursor only moves forward.
    pub claimed: Range<usize>,
}

impl ExtendedRow {
    /// All ids, the original editions followed by the new one.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.row
            .edition_ids()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.new_id.as_str()))
    }

    /// All texts, the original editions followed by the new one.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.row
            .edition_texts()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.new_text.as_str()))
    }

    pub fn is_gap(&self) -> bool {
        self.claimed.is_empty()
    }
}
