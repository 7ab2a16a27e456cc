//! # beodata-align core
//!
//! I/O-free logic for extending a multi-edition verse alignment with a
//! fine-grained token stream: position ids, the two input readers, the
//! aligner, and the output writer.
//!
//! Readers accept any [`std::io::BufRead`] and writers any
//! [`std::io::Write`]; nothing here touches the filesystem or a runtime.
//!
//! ```text
//! tokens ──▶ tokens::read_tokens ──┐
//!                                  ├──▶ align::Aligner ──▶ writer::RowWriter
//! aligned ─▶ aligned::read_aligned ┘
//! ```

pub mod align;
pub mod aligned;
pub mod models;
pub mod order;
pub mod parse;
pub mod position;
pub mod tokens;
pub mod writer;
