//! Input loading.
//!
//! Reads the tokenized stream and the aligned corpus concurrently. The
//! two files have no dependency on each other, so each is read and
//! parsed on its own blocking task and the results are joined.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use beodata_align_core::aligned::read_aligned;
use beodata_align_core::models::{AlignedRow, Token};
use beodata_align_core::order;
use beodata_align_core::parse::{ParseMode, Parsed, ReadError, SkippedLine};
use beodata_align_core::tokens::read_tokens;

use crate::config::Config;

/// One parsed input file plus its provenance.
#[derive(Debug)]
pub struct Loaded<T> {
    pub path: PathBuf,
    pub sha256: String,
    pub parsed: Parsed<T>,
}

impl<T> Loaded<T> {
    pub fn records(&self) -> &[T] {
        &self.parsed.records
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.parsed.skipped
    }
}

#[derive(Debug)]
pub struct Inputs {
    pub tokens: Loaded<Token>,
    pub rows: Loaded<AlignedRow>,
}

impl Inputs {
    /// Fail if either input breaks the ordering the aligner relies on.
    pub fn check_order(&self) -> Result<()> {
        order::check_tokens(self.tokens.records())
            .with_context(|| format!("Unordered tokens in {}", self.tokens.path.display()))?;
        order::check_rows(self.rows.records())
            .with_context(|| format!("Unordered rows in {}", self.rows.path.display()))?;
        Ok(())
    }
}

pub async fn load_inputs(config: &Config) -> Result<Inputs> {
    let mode = config.parsing.mode;
    let editions = config.inputs.editions;

    let (tokens, rows) = tokio::try_join!(
        load_file(&config.inputs.tokens, move |bytes| read_tokens(bytes, mode)),
        load_file(&config.inputs.aligned, move |bytes| {
            read_aligned(bytes, editions, mode)
        }),
    )?;

    log_loaded("tokens", &tokens, mode);
    log_loaded("aligned rows", &rows, mode);

    Ok(Inputs { tokens, rows })
}

async fn load_file<T, F>(path: &Path, parse: F) -> Result<Loaded<T>>
where
    T: Send + 'static,
    F: FnOnce(&[u8]) -> Result<Parsed<T>, ReadError> + Send + 'static,
{
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let sha256 = content_hash(&bytes);
    let parsed = tokio::task::spawn_blocking(move || parse(bytes.as_slice()))
        .await?
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Loaded {
        path: path.to_path_buf(),
        sha256,
        parsed,
    })
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn log_loaded<T>(what: &str, loaded: &Loaded<T>, mode: ParseMode) {
    log::info!(
        "loaded {} {} from {}",
        loaded.records().len(),
        what,
        loaded.path.display()
    );
    for skipped in loaded.skipped() {
        log::debug!(
            "{}:{}: skipped: {}",
            loaded.path.display(),
            skipped.line_number,
            skipped.reason
        );
    }
    if !loaded.skipped().is_empty() {
        log::warn!(
            "skipped {} malformed line(s) in {} ({:?} parsing)",
            loaded.skipped().len(),
            loaded.path.display(),
            mode
        );
    }
}
