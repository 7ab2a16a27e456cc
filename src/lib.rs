//! # beodata-align
//!
//! Extends a multi-edition verse alignment with a fine-grained, annotated
//! token stream.
//!
//! The alignment logic lives in [`beodata_align_core`]; this crate adds
//! configuration, concurrent file loading, and the `beo-align` commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ tokens.txt   │──┐   ┌────────────┐   ┌─────────────────────┐
//! └──────────────┘  ├──▶│  Aligner   │──▶│ aligned + new column │
//! ┌──────────────┐  │   │ (merge)    │   │ (text or JSON)       │
//! │ aligned.txt  │──┘   └────────────┘   └─────────────────────┘
//! └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! beo-align check                       # validate inputs
//! beo-align align                       # write the extended alignment
//! beo-align align --output -            # ... to stdout
//! beo-align export --output rows.json   # JSON with token annotations
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`load`] | Concurrent input loading |
//! | [`align_cmd`] | The `align` command |
//! | [`check`] | The `check` command |
//! | [`export`] | The `export` command |

pub mod align_cmd;
pub mod check;
pub mod config;
pub mod export;
pub mod load;
