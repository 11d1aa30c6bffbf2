//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! end to end, using `info --json` to assert the effective values.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("RICHTEXT_LINT_LOG_DIR", tmp.path().join("logs"))
        .env_remove("RICHTEXT_LINT_SITE_DOMAIN")
        .env_remove("RICHTEXT_LINT_TITLE_LOCALE");
    cmd
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(tmp: &TempDir, dir: &std::path::Path) -> Value {
    let output = cmd(tmp)
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(&tmp, tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
    assert!(json["config"]["site_domain"].is_null());
    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".richtext-lint.toml"),
        r#"site_domain = "https://www.example.org""#,
    )
    .unwrap();

    let json = info_json(&tmp, tmp.path());

    assert_eq!(json["config"]["site_domain"], "https://www.example.org");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with(".richtext-lint.toml"), "got {reported}");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("content").join("pages");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join("richtext.yaml"), "title_locale: en-US\n").unwrap();

    let json = info_json(&tmp, &nested);
    assert_eq!(json["config"]["title_locale"], "en-US");
}

#[test]
fn richtext_lint_name_overrides_richtext() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("richtext.toml"),
        "long_sentence_chars = 150\nwords_per_heading = 90\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("richtext-lint.json"),
        r#"{"long_sentence_chars": 180}"#,
    )
    .unwrap();

    let json = info_json(&tmp, tmp.path());
    assert_eq!(json["config"]["long_sentence_chars"], 180);
    assert_eq!(json["config"]["words_per_heading"], 90);
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".richtext.toml"), r#"log_level = "warn""#).unwrap();
    let explicit = tmp.path().join("custom.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let output = cmd(&tmp)
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["log_level"], "error");
    assert!(
        json["config"]["config_file"]
            .as_str()
            .unwrap()
            .ends_with("custom.toml")
    );
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".richtext-lint.toml"),
        r#"title_locale = "en-US""#,
    )
    .unwrap();

    let output = cmd(&tmp)
        .env("RICHTEXT_LINT_TITLE_LOCALE", "fr-FR")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["title_locale"], "fr-FR");
}

#[test]
fn disable_input_limit_hides_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("richtext-lint.toml"),
        "max_input_bytes = 100\ndisable_input_limit = true\n",
    )
    .unwrap();

    let json = info_json(&tmp, tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".richtext-lint.toml"), "this is [not toml").unwrap();

    cmd(&tmp)
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".richtext-lint.toml"),
        "log_level = \"debug\"\nnavigation_widget = true\n",
    )
    .unwrap();

    let json = info_json(&tmp, tmp.path());
    assert_eq!(json["config"]["log_level"], "debug");
}

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let work = repo.join("work");
    fs::create_dir_all(&work).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".richtext.toml"), r#"log_level = "warn""#).unwrap();

    let json = info_json(&tmp, &work);
    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn configured_site_domain_drives_check() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".richtext-lint.toml"),
        r#"site_domain = "https://www.example.org""#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("doc.json"),
        r#"{"nodeType": "document", "content": [{"nodeType": "paragraph", "content": [
            {"nodeType": "hyperlink", "data": {"uri": "https://www.example.org/a"},
             "content": [{"nodeType": "text", "value": "page"}]}
        ]}]}"#,
    )
    .unwrap();

    cmd(&tmp)
        .args(["-C", tmp.path().to_str().unwrap(), "check", "doc.json", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("noEntryLink"));
}
