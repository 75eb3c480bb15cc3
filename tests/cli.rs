use std::io::Write;
use std::process::Command;

use assert_cmd::prelude::*;
use serde_json::Value;

fn snapshot_file(blocks: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "- document:\n  - title \"CLI Page\"").unwrap();
    for i in 0..blocks {
        writeln!(file, "  - listitem [ref=e{}]: Content {}", i + 2, i).unwrap();
    }
    file
}

fn pagestate() -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("soulbrowser-pagestate");
    let mut cmd = Command::new(bin);
    cmd.env_remove("SOUL_PAGE_MAX_TOKENS")
        .env_remove("SOUL_PAGE_CHARS_PER_TOKEN")
        .env_remove("SOUL_PAGE_DIGEST")
        .args(["--config", "/nonexistent/pagestate.yaml"]);
    cmd
}

#[test]
fn page_command_prints_truncated_page() {
    let file = snapshot_file(500);
    let assert = pagestate()
        .args(["page", "--input", file.path().to_str().unwrap()])
        .args(["--max-tokens", "100", "--page", "1"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    assert!(stdout.contains("⚠️ Snapshot Truncated"));
    assert!(stdout.contains("Content exceeds 100 tokens"));
    assert!(stdout.contains("Page 2 of"));
}

#[test]
fn page_command_reports_out_of_range_as_json() {
    let file = snapshot_file(3);
    let assert = pagestate()
        .args(["--output", "json", "page", "--input", file.path().to_str().unwrap()])
        .args(["--page", "10"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["outcome"].as_str(), Some("out_of_range"));
    assert_eq!(value["totalPages"].as_u64(), Some(1));
    assert!(value["pageState"]
        .as_str()
        .unwrap()
        .starts_with("Error: Page 10 out of range"));
}

#[test]
fn stats_command_lists_pages() {
    let file = snapshot_file(200);
    let assert = pagestate()
        .args(["--output", "json", "stats", "--input", file.path().to_str().unwrap()])
        .args(["--max-tokens", "300"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["truncated"].as_bool(), Some(true));
    let pages = value["pages"].as_array().unwrap();
    assert!(pages.len() > 1);
    assert!(pages.iter().all(|p| p["tokens"].as_u64().unwrap() <= 300));
}

#[test]
fn call_command_omits_page_state_without_switch() {
    let file = snapshot_file(3);
    let assert = pagestate()
        .args(["--output", "json", "call", "--input", file.path().to_str().unwrap()])
        .args(["--tool", "browser_click", "--code", "await page.click();"])
        .assert()
        .success();
    let value: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(value["code"].as_str(), Some("await page.click();"));
    assert!(value.get("pageState").is_none());
}

#[test]
fn call_command_rejects_bad_params() {
    let file = snapshot_file(3);
    pagestate()
        .args(["call", "--input", file.path().to_str().unwrap()])
        .args(["--tool", "browser_snapshot", "--params", r#"{"maxTokens":"many"}"#])
        .assert()
        .failure();
}
