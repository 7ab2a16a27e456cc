use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn beo_align_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("beo-align");
    path
}

/// Tokenized-stream record with only the fields the aligner reads filled in.
fn token(line_id: &str, half: &str, offset: u32, with_length: &str, post_punc: &str) -> String {
    format!(
        "00|001|0|0|{}|{}|{}|-||text|{}|||lemma|pos||gloss|{}\n",
        line_id, half, offset, post_punc, with_length
    )
}

/// Aligned-corpus row with all five edition ids set to `anchor`.
fn row(anchor: &str, texts: [&str; 5]) -> String {
    format!("{} {}\n", [anchor; 5].join(" "), texts.join(" "))
}

fn beowulf_tokens() -> String {
    [
        token("0001", "a", 1, "Hwæt", "!"),
        token("0001", "a", 2, "Wē", ""),
        token("0001", "a", 3, "Gār-Dena", ""),
        token("0445", "a", 1, "mægenhrēð", ""),
        token("0445", "a", 2, "manna", "."),
        token("0445", "b", 1, "Nā", ""),
        token("3182", "b", 2, "lofgeornost", "."),
    ]
    .concat()
}

fn beowulf_rows() -> String {
    [
        row("0001a1", ["Hwæt!", "Hwæt!", "Hwæt!", "HWÆT:", "Hwæt,"]),
        row("0001a2", ["We", "We", "Wé", "WE", "wē"]),
        row("0001a3", ["Gardena", "Gardena", "Gárdena", "GAR-DENA", "Gār-Dena"]),
        row(
            "0445a1",
            [
                "mægen_Hreðmanna.",
                "mægen_Hreðmanna.",
                "mægenhréð_manna.",
                "mægenhreð_manna.",
                "mægenhrēð_manna.",
            ],
        ),
        row("0445b1", ["Na", "Na", "Ná", "Na", "Nā"]),
        row("0445b1", ["@", "@", "@", "@", "[þā"]),
        row("3182b2", ["lofgeornost."; 5]),
    ]
    .concat()
}

fn setup_test_env(tokens: &str, aligned: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("tokens.txt"), tokens).unwrap();
    fs::write(data_dir.join("aligned.txt"), aligned).unwrap();

    let config_content = format!(
        r#"[inputs]
tokens = "{root}/data/tokens.txt"
aligned = "{root}/data/aligned.txt"
editions = 5

[output]
path = "{root}/out/aligned_with_tokens.txt"

[parsing]
mode = "lenient"

[alignment]
validate_order = true
"#,
        root = root.display()
    );

    let config_path = config_dir.join("beo-align.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn output_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("out").join("aligned_with_tokens.txt")
}

fn run_beo_align(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = beo_align_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run beo-align binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn split_output(content: &str) -> Vec<(Vec<String>, Vec<String>)> {
    content
        .lines()
        .map(|line| {
            let parts: Vec<String> = line.split(' ').map(str::to_string).collect();
            let (ids, texts) = parts.split_at(6);
            (ids.to_vec(), texts.to_vec())
        })
        .collect()
}

#[test]
fn test_align_writes_one_row_per_input_row() {
    let (tmp, config_path) = setup_test_env(&beowulf_tokens(), &beowulf_rows());

    let (stdout, stderr, success) = run_beo_align(&config_path, &["align"]);
    assert!(success, "align failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("rows written: 7"));
    assert!(stdout.contains("ok"));

    let content = fs::read_to_string(output_path(&tmp)).unwrap();
    let rows = split_output(&content);
    assert_eq!(rows.len(), 7);
    for line in content.lines() {
        assert_eq!(line.split(' ').count(), 12);
    }

    let new_texts: Vec<&str> = rows.iter().map(|(_, texts)| texts[5].as_str()).collect();
    assert_eq!(
        new_texts,
        [
            "Hwæt!",
            "Wē",
            "Gār-Dena",
            "mægenhrēð_manna.",
            "Nā",
            "@",
            "lofgeornost."
        ]
    );
    let new_ids: Vec<&str> = rows.iter().map(|(ids, _)| ids[5].as_str()).collect();
    assert_eq!(
        new_ids,
        ["0001a1", "0001a2", "0001a3", "0445a1", "0445b1", "0445b1", "3182b2"]
    );
}

#[test]
fn test_align_keeps_original_columns() {
    let (tmp, config_path) = setup_test_env(&beowulf_tokens(), &beowulf_rows());

    let (_, stderr, success) = run_beo_align(&config_path, &["align"]);
    assert!(success, "align failed: {}", stderr);

    let content = fs::read_to_string(output_path(&tmp)).unwrap();
    for (input, output) in beowulf_rows().lines().zip(content.lines()) {
        let input: Vec<&str> = input.split(' ').collect();
        let output: Vec<&str> = output.split(' ').collect();
        assert_eq!(&output[..5], &input[..5]);
        assert_eq!(&output[6..11], &input[5..]);
    }
}

#[test]
fn test_align_to_stdout() {
    let (_tmp, config_path) = setup_test_env(&beowulf_tokens(), &beowulf_rows());

    let (stdout, stderr, success) = run_beo_align(&config_path, &["align", "--output", "-"]);
    assert!(success, "align failed: {}", stderr);
    assert_eq!(stdout.lines().count(), 7);
    assert!(stdout.starts_with("0001a1 0001a1 0001a1 0001a1 0001a1 0001a1 Hwæt!"));
    assert!(stderr.contains("rows written: 7"));
}

#[test]
fn test_malformed_lines_skipped_in_lenient_mode() {
    let tokens = format!("{}broken|record\n", beowulf_tokens());
    let rows = format!("{}0001a1 too few fields\n", beowulf_rows());
    let (tmp, config_path) = setup_test_env(&tokens, &rows);

    let (stdout, stderr, success) = run_beo_align(&config_path, &["align"]);
    assert!(success, "align failed: {}", stderr);
    assert!(stdout.contains("tokens read: 7 (skipped lines: 1)"));
    assert!(stdout.contains("rows read: 7 (skipped lines: 1)"));
    let content = fs::read_to_string(output_path(&tmp)).unwrap();
    assert_eq!(content.lines().count(), 7);
}

#[test]
fn test_strict_mode_rejects_malformed_lines() {
    let tokens = format!("{}broken|record\n", beowulf_tokens());
    let (tmp, config_path) = setup_test_env(&tokens, &beowulf_rows());

    let (_, stderr, success) = run_beo_align(&config_path, &["align", "--strict"]);
    assert!(!success, "strict align should fail");
    assert!(stderr.contains("line 8"), "stderr: {}", stderr);
    assert!(!output_path(&tmp).exists());
}

#[test]
fn test_unordered_input_fails_fast() {
    let rows = [
        row("0001a2", ["We"; 5]),
        row("0001a1", ["Hwæt!"; 5]),
    ]
    .concat();
    let (tmp, config_path) = setup_test_env(&beowulf_tokens(), &rows);

    let (_, stderr, success) = run_beo_align(&config_path, &["align"]);
    assert!(!success);
    assert!(stderr.contains("Unordered rows"), "stderr: {}", stderr);
    assert!(!output_path(&tmp).exists());
}

#[test]
fn test_check_reports_counts() {
    let (_tmp, config_path) = setup_test_env(&beowulf_tokens(), &beowulf_rows());

    let (stdout, stderr, success) = run_beo_align(&config_path, &["check"]);
    assert!(success, "check failed: {}", stderr);
    assert!(stdout.contains("token order: ok"));
    assert!(stdout.contains("row order: ok"));
    assert!(stdout.contains("tokens claimed: 7 / 7"));
    assert!(stdout.contains("gap rows: 1"));
    assert!(stdout.contains("join rows: 1"));
}

#[test]
fn test_check_flags_unordered_tokens() {
    let tokens = [
        token("0001", "a", 2, "Wē", ""),
        token("0001", "a", 1, "Hwæt", "!"),
    ]
    .concat();
    let (_tmp, config_path) = setup_test_env(&tokens, &beowulf_rows());

    let (stdout, _, success) = run_beo_align(&config_path, &["check"]);
    assert!(!success);
    assert!(stdout.contains("token order: FAILED"));
}

#[test]
fn test_export_json() {
    let (tmp, config_path) = setup_test_env(&beowulf_tokens(), &beowulf_rows());
    let export_path = tmp.path().join("export.json");

    let (_, stderr, success) = run_beo_align(
        &config_path,
        &["export", "--output", export_path.to_str().unwrap()],
    );
    assert!(success, "export failed: {}", stderr);

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(value["editions"], 6);
    assert_eq!(value["rows"].as_array().unwrap().len(), 7);
    let join = &value["rows"][3];
    assert_eq!(join["texts"][5], "mægenhrēð_manna.");
    assert_eq!(join["tokens"].as_array().unwrap().len(), 2);
    assert_eq!(join["tokens"][1]["id"], "0445a2");
    assert_eq!(join["tokens"][1]["lemma"], "lemma");
}

#[test]
fn test_flags_work_without_config_file() {
    let (tmp, _) = setup_test_env(&beowulf_tokens(), &beowulf_rows());
    let data = tmp.path().join("data");
    let missing_config = tmp.path().join("absent.toml");

    let (stdout, stderr, success) = run_beo_align(
        &missing_config,
        &[
            "align",
            "--tokens",
            data.join("tokens.txt").to_str().unwrap(),
            "--aligned",
            data.join("aligned.txt").to_str().unwrap(),
            "--output",
            "-",
        ],
    );
    assert!(success, "align failed: {}", stderr);
    assert_eq!(stdout.lines().count(), 7);
}
