//! Input health check.
//!
//! Used by `beo-align check` to validate both inputs without writing
//! anything: record counts, malformed lines, ordering, and a dry run of
//! the aligner to show how many tokens would go unclaimed.

use anyhow::Result;

use beodata_align_core::align::Aligner;
use beodata_align_core::order;

use crate::config::Config;
use crate::load::{self, Loaded};

/// How many skipped lines to list per file before summarising.
const MAX_LISTED: usize = 10;

pub async fn run_check(config: &Config) -> Result<()> {
    let inputs = load::load_inputs(config).await?;

    println!("check ({:?} parsing)", config.parsing.mode);
    print_file("tokens", &inputs.tokens);
    print_file("aligned", &inputs.rows);

    let token_order = order::check_tokens(inputs.tokens.records());
    let row_order = order::check_rows(inputs.rows.records());
    println!("  token order: {}", order_status(&token_order));
    println!("  row order: {}", order_status(&row_order));

    if let (Ok(()), Ok(())) = (&token_order, &row_order) {
        let summary = Aligner::new(inputs.rows.records(), inputs.tokens.records()).finish();
        println!("  rows: {}", summary.rows);
        println!("  tokens claimed: {} / {}", summary.claimed, summary.tokens);
        println!("  gap rows: {}", summary.gap_rows);
        println!("  join rows: {}", summary.join_rows);
        println!(
            "  unclaimed tokens: {} (leading {}, skipped {}, trailing {})",
            summary.unclaimed(),
            summary.leading_unclaimed,
            summary.skipped_unclaimed,
            summary.trailing_unclaimed
        );
    }

    token_order?;
    row_order?;
    println!("ok");
    Ok(())
}

fn print_file<T>(label: &str, loaded: &Loaded<T>) {
    println!(
        "  {:<8} {}  records: {}  skipped lines: {}",
        label,
        loaded.path.display(),
        loaded.records().len(),
        loaded.skipped().len()
    );
    for skipped in loaded.skipped().iter().take(MAX_LISTED) {
        println!("    line {}: {}", skipped.line_number, skipped.reason);
    }
    if loaded.skipped().len() > MAX_LISTED {
        println!("    ... {} more", loaded.skipped().len() - MAX_LISTED);
    }
}

fn order_status(result: &Result<(), order::OrderError>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(err) => format!("FAILED ({})", err),
    }
}
