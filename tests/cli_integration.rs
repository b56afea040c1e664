//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Run lextrie against a trie file and return (stdout, stderr, success)
fn run_lextrie(args: &[&str], trie_path: &Path) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_lextrie"))
        .args(["-f", trie_path.to_str().unwrap(), "-o", "json"])
        .args(args)
        .output()
        .expect("Failed to execute lextrie");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be one JSON document")
}

#[test]
fn test_cli_init_creates_trie_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");

    let (stdout, _stderr, success) = run_lextrie(&["init"], &path);

    assert!(success, "init should succeed");
    let doc = parse(&stdout);
    assert_eq!(doc["status"], "ok");
    assert_eq!(doc["kind"], "radix");
    assert!(path.exists(), "trie file should be created");
}

#[test]
fn test_cli_init_standard_kind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");

    let (stdout, _stderr, success) = run_lextrie(&["init", "--standard"], &path);

    assert!(success);
    assert_eq!(parse(&stdout)["kind"], "standard");
}

#[test]
fn test_cli_insert_and_query() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);

    let (stdout, _stderr, success) =
        run_lextrie(&["insert", "alpha", "alphabet", "beta"], &path);
    assert!(success);
    let doc = parse(&stdout);
    assert_eq!(doc["added"], 3);
    assert_eq!(doc["words"], 3);

    let (stdout, _, _) = run_lextrie(&["query", "alpha"], &path);
    assert_eq!(parse(&stdout)["found"], true);

    let (stdout, _, _) = run_lextrie(&["query", "alp"], &path);
    assert_eq!(parse(&stdout)["found"], false);

    let (stdout, _, _) = run_lextrie(&["query", "--prefix", "alp"], &path);
    assert_eq!(parse(&stdout)["found"], true);
}

#[test]
fn test_cli_insert_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "echo"], &path);

    let (stdout, _, _) = run_lextrie(&["insert", "echo"], &path);
    let doc = parse(&stdout);
    assert_eq!(doc["added"], 0);
    assert_eq!(doc["words"], 1);
}

#[test]
fn test_cli_insert_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    let list = dir.path().join("list.txt");
    std::fs::write(&list, "alpha\nbeta\n\n  gamma  \n").unwrap();

    run_lextrie(&["init"], &path);
    let (stdout, _, success) =
        run_lextrie(&["insert", "-F", list.to_str().unwrap()], &path);

    assert!(success);
    assert_eq!(parse(&stdout)["words"], 3);
}

#[test]
fn test_cli_complete() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "alpha", "alphabet", "alpine", "beta"], &path);

    let (stdout, _, success) = run_lextrie(&["complete", "alp"], &path);
    assert!(success);
    let doc = parse(&stdout);
    assert_eq!(doc["total"], 3);
    let words: Vec<&str> = doc["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect();
    assert_eq!(words, vec!["alpha", "alphabet", "alpine"]);

    let (stdout, _, _) = run_lextrie(&["complete", "alp", "--limit", "2"], &path);
    assert_eq!(parse(&stdout)["words"].as_array().unwrap().len(), 2);

    let (stdout, _, _) = run_lextrie(&["complete", "zzz"], &path);
    assert_eq!(parse(&stdout)["total"], 0);
}

#[test]
fn test_cli_stats() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "alpha", "alphabet"], &path);

    let (stdout, _, success) = run_lextrie(&["stats"], &path);
    assert!(success);
    let doc = parse(&stdout);
    assert_eq!(doc["words"], 2);
    assert_eq!(doc["nodes"], 3);
    assert_eq!(doc["depth"], 2);
    assert_eq!(doc["fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_cli_lcp_and_branches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "alphabet", "alpine"], &path);

    let (stdout, _, _) = run_lextrie(&["lcp"], &path);
    assert_eq!(parse(&stdout)["prefix"], "alp");

    let (stdout, _, _) = run_lextrie(&["branches"], &path);
    let parsed = parse(&stdout);
    let branches: Vec<&str> = parsed["branches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b.as_str().unwrap())
        .collect();
    assert_eq!(branches, vec!["alp", "alphabet", "alpine"]);
}

#[test]
fn test_cli_ngrams() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "hello"], &path);

    let (stdout, _, _) = run_lextrie(&["ngrams", "-n", "2"], &path);
    let doc = parse(&stdout);
    let grams: Vec<&str> = doc["ngrams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap())
        .collect();
    assert_eq!(grams, vec!["el", "he", "ll", "lo"]);
}

#[test]
fn test_cli_filter_by_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "go", "gone", "gonna", "alphabet"], &path);

    let (stdout, _, success) = run_lextrie(&["filter", "--max-len", "4"], &path);
    assert!(success);
    let doc = parse(&stdout);
    assert_eq!(doc["kept"], 2);
    assert_eq!(doc["dropped"], 2);

    let (stdout, _, _) = run_lextrie(&["query", "gone"], &path);
    assert_eq!(parse(&stdout)["found"], true);
    let (stdout, _, _) = run_lextrie(&["query", "alphabet"], &path);
    assert_eq!(parse(&stdout)["found"], false);
}

#[test]
fn test_cli_merge_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.trie");
    let second = dir.path().join("second.trie");

    run_lextrie(&["init"], &first);
    run_lextrie(&["insert", "alpha", "beta"], &first);
    run_lextrie(&["init"], &second);
    run_lextrie(&["insert", "alpha", "gamma"], &second);

    let (stdout, _, success) =
        run_lextrie(&["merge", second.to_str().unwrap()], &first);
    assert!(success);
    assert_eq!(parse(&stdout)["words"], 3);

    for word in ["alpha", "beta", "gamma"] {
        let (stdout, _, _) = run_lextrie(&["query", word], &first);
        assert_eq!(parse(&stdout)["found"], true, "{word} should be present");
    }
}

#[test]
fn test_cli_show_text_renders_tree() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.trie");
    run_lextrie(&["init"], &path);
    run_lextrie(&["insert", "alpha", "alphabet"], &path);

    let output = Command::new(env!("CARGO_BIN_EXE_lextrie"))
        .args(["-f", path.to_str().unwrap(), "-o", "text", "show"])
        .output()
        .expect("Failed to execute lextrie");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("alpha"));
    assert!(stdout.contains("bet"));
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.trie");

    let (_stdout, stderr, success) = run_lextrie(&["stats"], &path);
    assert!(!success);
    assert!(stderr.contains("cannot read"));
}

#[test]
fn test_cli_rejects_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.trie");
    std::fs::write(
        &path,
        r#"{"kind":"radix","root":{"children":[{"edge":"ab","terminal":true},{"edge":"ac","terminal":true}]}}"#,
    )
    .unwrap();

    let (_stdout, stderr, success) = run_lextrie(&["stats"], &path);
    assert!(!success);
    assert!(stderr.contains("Malformed trie data"));
}
