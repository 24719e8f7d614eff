use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_bindcheck")))
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn bind(schema: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    cmd().args(["-s", &fixture(schema), "--"]).args(args).assert()
}

#[test]
fn cli_prints_bound_values() {
    bind("copy.json", &["x", "y", "-vv", "--tags=a,b"])
        .success()
        .stdout("verbose = 2\nmode = 644\nforce = false\ntags = [a, b]\nfiles = [x, y]\n");
}

#[test]
fn cli_reports_all_errors() {
    bind("copy.json", &["--weburl", "w", "--ftpurl", "f", "--mode", "x", "only"])
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with("ERROR(S):\n"))
        .stderr(predicate::str::contains("Option 'mode' is defined with a bad format."))
        .stderr(predicate::str::contains("Option: 'weburl' is not compatible with: 'ftpurl'."))
        .stderr(predicate::str::contains("Option: 'ftpurl' is not compatible with: 'weburl'."))
        .stderr(predicate::str::contains("A sequence value not bound to option name"));
}

#[test]
fn cli_json_errors_on_stdout() {
    let output = cmd()
        .args(["-s", &fixture("copy.json"), "-f", "json", "--", "--nope", "a", "b"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["errors"][0]["kind"], "UnknownOptionError");
    assert_eq!(json["errors"][0]["token"], "nope");
}

#[test]
fn cli_json_values() {
    let output = cmd()
        .args(["-s", &fixture("copy.json"), "--format", "json", "--", "-f", "a", "b"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "parsed");
    assert_eq!(json["type"], "copy");
    assert_eq!(json["values"]["force"], true);
    assert_eq!(json["values"]["files"], serde_json::json!(["a", "b"]));
}

#[test]
fn cli_help_and_version() {
    bind("copy.json", &["a", "--help"])
        .success()
        .stdout(predicate::str::starts_with("cp 1.2.0\n\nUsage:\n  cp [options] ...files\n"))
        .stdout(predicate::str::contains("   -m, --mode int (default: 644)\n"))
        .stdout(predicate::str::contains("           More output\n"));
    bind("copy.json", &["--version"]).success().stdout("cp 1.2.0\n");
}

#[test]
fn cli_help_value_is_not_a_request() {
    bind("copy.json", &["--weburl", "--help", "a", "b"])
        .success()
        .stdout(predicate::str::contains("web = --help\n"));
}

#[test]
fn cli_unparse_round_trip() {
    cmd()
        .args(["-s", &fixture("copy.json"), "--unparse", "--skip-default", "--dash-dash", "--"])
        .args(["-v", "-v", "--weburl", "two words", "a", "b"])
        .assert()
        .success()
        .stdout("-v -v --weburl \"two words\" -- a b\n");

    cmd()
        .args(["-s", &fixture("copy.json"), "--dash-dash", "--"])
        .args(["-v", "-v", "--weburl", "two words", "--", "a", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web = two words\n"))
        .stdout(predicate::str::contains("files = [a, b]\n"));
}

#[test]
fn cli_verbs() {
    bind("git.json", &["commit", "-m", "msg"])
        .success()
        .stdout("verb = commit\nmessage = msg\namend = false\n");
    bind("git.json", &["a", "-A", "src"])
        .success()
        .stdout("verb = add\nall = true\npaths = [src]\n");
    bind("git.json", &["push"])
        .code(2)
        .stderr("ERROR(S):\n  Verb 'push' is not recognized.\n");
    bind("git.json", &["commit"])
        .code(2)
        .stderr(predicate::str::contains("Required option 'm, message' is missing."));
}

#[test]
fn cli_verb_help() {
    bind("git.json", &["--help"])
        .success()
        .stdout(predicate::str::starts_with("Usage: git <command> [args]\n\nAvailable Commands:\n"))
        .stdout(predicate::str::contains("  add, a                  Add file contents to the index\n"));
    bind("git.json", &["help", "commit"])
        .success()
        .stdout(predicate::str::starts_with("Usage:\n  git commit [options]\n"));
}

#[test]
fn cli_schema_errors() {
    let mut schema = NamedTempFile::new().unwrap();
    schema.write_all(br#"{"target": {"name": "t", "options": [{"property": "x", "kind": "switch"}]}}"#).unwrap();
    cmd()
        .args(["-s", schema.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid declaration of 't'"));

    cmd()
        .args(["-s", "/nonexistent/schema.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));

    cmd()
        .args(["-s", &fixture("copy.json"), "-f", "xml", "--", "a", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn cli_settings_flags() {
    bind("copy.json", &["--FORCE", "a", "b"]).code(2);
    cmd()
        .args(["-s", &fixture("copy.json"), "--ignore-case", "--", "--FORCE", "a", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("force = true\n"));
    cmd()
        .args(["-s", &fixture("copy.json"), "--ignore-unknown", "--", "--nope", "a", "b"])
        .assert()
        .success();
}
