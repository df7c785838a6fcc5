use std::io::Write;
use std::process::{Command, Stdio};

fn fixture_path(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/tests/fixtures/{name}")
}

fn sentisense_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentisense"));
    cmd.arg("--no-color").env_remove("RUST_LOG");
    cmd
}

/// Run with `stdin_data` piped in, from a scratch working directory.
fn run_with_stdin(args: &[&str], stdin_data: &str, dir: &std::path::Path) -> std::process::Output {
    let mut child = sentisense_cmd()
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sentisense");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin_data.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait on sentisense")
}

#[test]
fn test_analyze_positive_text() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "I love this product, it's amazing!"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "sentisense analyze failed: stdout={stdout}, stderr={stderr}"
    );
    assert!(
        stdout.contains("Primary Sentiment: Positive 😊"),
        "should report positive: {stdout}"
    );
    assert!(stdout.contains("Sentiment Breakdown"));
    assert!(stdout.contains("Compound Sentiment Score"));
}

#[test]
fn test_analyze_json_output() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "terrible", "--format", "json", "--compact"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim().lines().count(), 1, "compact JSON: {stdout}");
    assert!(stdout.contains("\"label\":\"negative\""), "{stdout}");
}

#[test]
fn test_analyze_empty_input_warns() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_with_stdin(&["analyze"], "   \n", dir.path());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        output.status.code(),
        Some(1),
        "expected exit code 1 for empty input, stderr={stderr}"
    );
    assert!(
        stderr.contains("Please enter text for analysis."),
        "should warn: {stderr}"
    );
}

#[test]
fn test_analyze_rejects_unknown_format() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "great", "--format", "yaml"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown output format"), "{stderr}");
}

#[test]
fn test_analyze_csv_output() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "terrible", "--format", "csv"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert_eq!(
        lines[0],
        "Text,Primary Sentiment,Positive,Neutral,Negative,Compound"
    );
    assert!(lines[1].starts_with("terrible,Negative"), "{stdout}");
}

#[test]
fn test_analyze_text_conflicts_with_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "great", "--file", &fixture_path("reviews.txt")])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"), "{stderr}");
}

#[test]
fn test_analyze_reads_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["analyze", "--file", &fixture_path("reviews.txt")])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("Analysis Results"), "{stdout}");
}

#[test]
fn test_batch_exports_csv() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let out_path = dir.path().join("results.csv");
    let output = sentisense_cmd()
        .args([
            "batch",
            &fixture_path("reviews.txt"),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense batch");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "batch failed: {stdout}");
    assert!(stdout.contains("Sentiment Analysis History Timeline"));
    assert!(stdout.contains("4 analyses"), "{stdout}");

    let csv = std::fs::read_to_string(&out_path).expect("export should exist");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5, "header plus one row per non-empty line");
    assert_eq!(
        lines[0],
        "Text,Primary Sentiment,Positive,Neutral,Negative,Compound"
    );
    assert!(lines[1].starts_with("\"I love this product, it's amazing!\",Positive 😊"));
    assert!(lines[3].starts_with("It arrived on Tuesday.,Neutral 😐"));
}

#[test]
fn test_batch_csv_to_stdout() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_with_stdin(&["batch", "--format", "csv"], "great\nterrible\n", dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("great,Positive"));
    assert!(lines[2].starts_with("terrible,Negative"));
}

#[test]
fn test_session_reset_and_export() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let script = "great\n\nterrible\n:a\n:reset\nok\n\ngreat\n\n:history\n:quit\n";
    let output = run_with_stdin(
        &["session", "--export", "session.csv"],
        script,
        dir.path(),
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "session failed: {stdout}");
    assert!(stdout.contains("History reset."));
    assert!(stdout.contains("Exported 2 rows"), "{stdout}");
    assert!(stdout.contains("(text/csv)"), "{stdout}");

    let csv = std::fs::read_to_string(dir.path().join("session.csv")).expect("export should exist");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("ok,"));
    assert!(lines[2].starts_with("great,"));
}

#[test]
fn test_session_empty_submit_warns() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = run_with_stdin(&["session"], ":analyze\n:history\n", dir.path());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Please enter text for analysis."), "{stdout}");
    assert!(stdout.contains("No analyses yet."), "{stdout}");
}

#[test]
fn test_init_creates_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let output = sentisense_cmd()
        .args(["init"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense init");

    assert!(output.status.success(), "init should succeed");

    let config_path = dir.path().join(".sentisense.toml");
    assert!(config_path.exists(), ".sentisense.toml should be created");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[scorer]"));
    assert!(content.contains("[session]"));

    let again = sentisense_cmd()
        .args(["init"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense init");
    assert_eq!(again.status.code(), Some(2), "init without --force should refuse");
}

#[test]
fn test_config_lexicon_is_used() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(dir.path().join("words.txt"), "stonks\t3.0\n").unwrap();
    std::fs::write(
        dir.path().join(".sentisense.toml"),
        "[scorer]\nlexicon = \"words.txt\"\n",
    )
    .unwrap();

    let output = sentisense_cmd()
        .args(["analyze", "stonks"])
        .current_dir(dir.path())
        .output()
        .expect("failed to run sentisense analyze");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("Positive 😊"), "{stdout}");
}
