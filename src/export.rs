//! Export the extended alignment as JSON.
//!
//! Produces one document with the provenance of both inputs and, for
//! every aligned row, all edition ids and texts plus the annotated tokens
//! it claimed. Downstream lookup tools load this as static data.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use beodata_align_core::align::{AlignSummary, Aligner};
use beodata_align_core::models::{ExtendedRow, Token, TokenAnnotation};

use crate::align_cmd::check_unclaimed;
use crate::config::Config;
use crate::load::{self, Loaded};

#[derive(Serialize)]
struct ExportData<'a> {
    sources: Vec<ExportSource<'a>>,
    editions: usize,
    summary: ExportSummary,
    rows: Vec<ExportRow<'a>>,
}

#[derive(Serialize)]
struct ExportSource<'a> {
    kind: &'static str,
    path: &'a Path,
    sha256: &'a str,
    records: usize,
    skipped_lines: usize,
}

#[derive(Serialize)]
struct ExportSummary {
    rows: usize,
    tokens: usize,
    claimed: usize,
    gap_rows: usize,
    join_rows: usize,
    unclaimed: usize,
}

impl From<&AlignSummary> for ExportSummary {
    fn from(s: &AlignSummary) -> Self {
        Self {
            rows: s.rows,
            tokens: s.tokens,
            claimed: s.claimed,
            gap_rows: s.gap_rows,
            join_rows: s.join_rows,
            unclaimed: s.unclaimed(),
        }
    }
}

#[derive(Serialize)]
struct ExportRow<'a> {
    ids: Vec<String>,
    texts: Vec<String>,
    tokens: Vec<ExportToken<'a>>,
}

#[derive(Serialize)]
struct ExportToken<'a> {
    id: &'a str,
    surface: &'a str,
    #[serde(flatten)]
    annotation: &'a TokenAnnotation,
}

impl<'a> ExportRow<'a> {
    fn new(row: &ExtendedRow, tokens: &'a [Token]) -> Self {
        Self {
            ids: row.ids().map(str::to_string).collect(),
            texts: row.texts().map(str::to_string).collect(),
            tokens: tokens[row.claimed.clone()]
                .iter()
                .map(|t| ExportToken {
                    id: &t.id_string,
                    surface: &t.surface_text,
                    annotation: &t.annotation,
                })
                .collect(),
        }
    }
}

fn source<'a, T>(kind: &'static str, loaded: &'a Loaded<T>) -> ExportSource<'a> {
    ExportSource {
        kind,
        path: &loaded.path,
        sha256: &loaded.sha256,
        records: loaded.records().len(),
        skipped_lines: loaded.skipped().len(),
    }
}

/// Run the aligner and write the result as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub async fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let inputs = load::load_inputs(config).await?;
    if config.alignment.validate_order {
        inputs.check_order()?;
    }

    let tokens = inputs.tokens.records();
    let mut aligner = Aligner::new(inputs.rows.records(), tokens);
    let rows: Vec<ExportRow> = aligner
        .by_ref()
        .map(|row| ExportRow::new(&row, tokens))
        .collect();
    let summary = aligner.finish();
    check_unclaimed(&summary, tokens, config)?;

    let data = ExportData {
        sources: vec![
            source("tokens", &inputs.tokens),
            source("aligned", &inputs.rows),
        ],
        editions: config.inputs.editions + 1,
        summary: ExportSummary::from(&summary),
        rows,
    };
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} rows ({} tokens claimed) to {}",
                summary.rows,
                summary.claimed,
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use tempfile::TempDir;

    #[tokio::test]
    async fn exports_rows_with_claimed_annotations() {
        let tmp = TempDir::new().unwrap();
        let tokens_path = tmp.path().join("tokens.txt");
        let aligned_path = tmp.path().join("aligned.txt");
        std::fs::write(
            &tokens_path,
            "00|001|1|0|0001|a|1|-||Hwæt|!|||hwæt|e||well|Hwæt\n",
        )
        .unwrap();
        std::fs::write(&aligned_path, "0001a1 Hwæt!\n0001a2 We\n").unwrap();
        let config = Config::minimal()
            .apply(Overrides {
                tokens: Some(tokens_path),
                aligned: Some(aligned_path),
                editions: Some(1),
                ..Overrides::default()
            })
            .unwrap();

        let out = tmp.path().join("export.json");
        run_export(&config, Some(&out)).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["editions"], 2);
        assert_eq!(value["summary"]["claimed"], 1);
        assert_eq!(value["summary"]["gap_rows"], 1);
        assert_eq!(value["sources"][0]["kind"], "tokens");
        assert_eq!(value["sources"][0]["sha256"].as_str().unwrap().len(), 64);

        let first = &value["rows"][0];
        assert_eq!(first["ids"], serde_json::json!(["0001a1", "0001a1"]));
        assert_eq!(first["texts"], serde_json::json!(["Hwæt!", "Hwæt!"]));
        assert_eq!(first["tokens"][0]["lemma"], "hwæt");
        assert_eq!(first["tokens"][0]["gloss"], "well");

        let second = &value["rows"][1];
        assert_eq!(second["texts"], serde_json::json!(["We", "@"]));
        assert_eq!(second["tokens"], serde_json::json!([]));
    }
}
