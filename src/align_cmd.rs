//! The `align` command.
//!
//! Loads both inputs, optionally checks their ordering, streams the
//! merged rows into the output file (or stdout for `-`), then reports
//! what happened.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use beodata_align_core::align::{AlignSummary, Aligner};
use beodata_align_core::models::Token;
use beodata_align_core::writer::RowWriter;

use crate::config::Config;
use crate::load::{self, Inputs};

/// Output path meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

pub async fn run_align(config: &Config) -> Result<()> {
    let inputs = load::load_inputs(config).await?;
    if config.alignment.validate_order {
        inputs.check_order()?;
    }

    let out_path = config.output.path.as_path();
    let to_stdout = out_path == Path::new(STDOUT_PATH);
    let sink: Box<dyn Write> = if to_stdout {
        Box::new(io::stdout().lock())
    } else {
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(out_path)
            .with_context(|| format!("Failed to create output file: {}", out_path.display()))?;
        Box::new(file)
    };

    let mut writer = RowWriter::new(BufWriter::new(sink));
    let mut aligner = Aligner::new(inputs.rows.records(), inputs.tokens.records());
    for row in aligner.by_ref() {
        writer
            .write_row(&row)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
    }
    let summary = aligner.finish();
    let written = writer.written();
    writer
        .into_inner()
        .with_context(|| format!("Failed to flush {}", out_path.display()))?;

    if let Err(err) = check_unclaimed(&summary, inputs.tokens.records(), config) {
        if !to_stdout {
            let _ = std::fs::remove_file(out_path);
        }
        return Err(err);
    }

    let report = format_report(&inputs, &summary, written, out_path);
    log::info!(
        "aligned {} rows, {} of {} tokens claimed",
        summary.rows,
        summary.claimed,
        summary.tokens
    );
    if to_stdout {
        eprint!("{}", report);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Warn about tokens no row claimed; fail if the config says so.
pub fn check_unclaimed(summary: &AlignSummary, tokens: &[Token], config: &Config) -> Result<()> {
    let Some(first) = summary.first_unclaimed else {
        return Ok(());
    };
    let first_id = tokens
        .get(first)
        .map(|t| t.id_string.as_str())
        .unwrap_or("?");
    log::warn!(
        "{} token(s) not attributed to any row ({} leading, {} skipped, {} trailing); first is {}",
        summary.unclaimed(),
        summary.leading_unclaimed,
        summary.skipped_unclaimed,
        summary.trailing_unclaimed,
        first_id
    );
    if config.alignment.fail_on_unclaimed {
        anyhow::bail!(
            "{} token(s) were not attributed to any row, first at {}",
            summary.unclaimed(),
            first_id
        );
    }
    Ok(())
}

fn format_report(inputs: &Inputs, summary: &AlignSummary, written: usize, out: &Path) -> String {
    let mut report = String::new();
    report.push_str("align\n");
    report.push_str(&format!(
        "  tokens read: {} (skipped lines: {})\n",
        inputs.tokens.records().len(),
        inputs.tokens.skipped().len()
    ));
    report.push_str(&format!(
        "  rows read: {} (skipped lines: {})\n",
        inputs.rows.records().len(),
        inputs.rows.skipped().len()
    ));
    report.push_str(&format!("  rows written: {}\n", written));
    report.push_str(&format!("  tokens claimed: {}\n", summary.claimed));
    report.push_str(&format!("  gap rows: {}\n", summary.gap_rows));
    report.push_str(&format!("  join rows: {}\n", summary.join_rows));
    report.push_str(&format!("  unclaimed tokens: {}\n", summary.unclaimed()));
    report.push_str(&format!("  output: {}\n", out.display()));
    report.push_str("ok\n");
    report
}
