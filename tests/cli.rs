//! End-to-end tests for the argtail-check binary.
//!
//! Each test builds a throwaway Go tree in a temp directory, runs the
//! binary on it and checks the exit code, the report and the files left on
//! disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// Test Infrastructure
// ============================================================================

const NORMAL_IN: &str = "// normal is a normal program.
package main

import (
\t\"flag\"
\t\"fmt\"
)

func main() {
\tflag.Parse()
\tfmt.Println(\"Hello world\")
}
";

const NORMAL_OUT: &str = "// normal is a normal program.
package main

import (
\t\"flag\"
\t\"fmt\"
\t\"log\"
)

func main() {
\tflag.Parse()
\tif flag.NArg() != 0 {
\t\tlog.Fatalf(\"Trailing args not expected: %q\", flag.Args())
\t}
\tfmt.Println(\"Hello world\")
}
";

const NO_PARSE: &str = "package main\n\nfunc main() {}\n";

const BROKEN: &str = "package main\n\nfunc main() {\n\tflag.Parse(\n}\n";

fn argtail_check() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argtail-check"))
}

fn write(root: &Path, rel: &str, text: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn run(args: &[&str], cwd: &Path) -> Output {
    argtail_check()
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argtail-check")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, stdout(output)))
}

// ============================================================================
// Rewrites
// ============================================================================

#[test]
fn rewrites_file_in_place() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.go", NORMAL_IN);

    let output = run(&["main.go"], dir.path());
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(fs::read_to_string(&main).unwrap(), NORMAL_OUT);
    assert_eq!(
        stdout(&output),
        "rewrote main.go (guard after line 10)\n1 file(s): 1 rewritten, 0 skipped, 0 failed\n"
    );
}

#[test]
fn second_run_has_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.go", NORMAL_IN);

    run(&["main.go"], dir.path());
    let output = run(&["main.go"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output)
        .starts_with("nothing to do: main.go: code already checking trailing args\n"));
    assert_eq!(fs::read_to_string(&main).unwrap(), NORMAL_OUT);
}

#[test]
fn dry_run_prints_diff_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.go", NORMAL_IN);

    let output = run(&["--dry-run", "main.go"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("would rewrite main.go (guard after line 10)\n--- a/main.go\n"));
    assert!(text.contains("+\t\"log\"\n"), "{}", text);
    assert!(text.contains("+\tif flag.NArg() != 0 {\n"), "{}", text);
    assert_eq!(fs::read_to_string(&main).unwrap(), NORMAL_IN);
}

#[test]
fn walks_directories() {
    let dir = TempDir::new().unwrap();
    let tool = write(dir.path(), "cmd/tool/main.go", NORMAL_IN);
    let vendored = write(dir.path(), "vendor/x/main.go", NORMAL_IN);
    write(dir.path(), "lib/lib.go", NO_PARSE);

    let output = run(&["--format", "json", "."], dir.path());
    assert_eq!(output.status.code(), Some(0));
    let value = json(&output);
    assert_eq!(value["summary"]["rewritten"], 1);
    assert_eq!(value["summary"]["skipped"], 1);
    assert_eq!(fs::read_to_string(&tool).unwrap(), NORMAL_OUT);
    assert_eq!(fs::read_to_string(&vendored).unwrap(), NORMAL_IN);
}

#[test]
fn custom_function() {
    let dir = TempDir::new().unwrap();
    let source = "package main\n\nimport \"flag\"\n\nfunc run() {\n\tflag.Parse()\n}\n";
    let path = write(dir.path(), "run.go", source);

    let output = run(&["--function", "run", "run.go"], dir.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("func run() {\n\tflag.Parse()\n\tif flag.NArg() != 0 {"));
}

// ============================================================================
// JSON report
// ============================================================================

#[test]
fn json_report_shape() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.go", NORMAL_IN);
    write(dir.path(), "b.go", NO_PARSE);

    let output = run(&["--format", "json", "a.go", "b.go"], dir.path());
    let value = json(&output);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["schema_version"], "1");
    assert_eq!(value["dry_run"], false);

    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["path"], "a.go");
    assert_eq!(files[0]["outcome"], "rewritten");
    assert_eq!(files[0]["line"], 10);
    assert_eq!(files[1]["outcome"], "skipped");
    assert_eq!(files[1]["reason"], "no_parse_calls");
    assert_eq!(files[1]["message"], "no flag parse calls found");
}

// ============================================================================
// Failures and exit codes
// ============================================================================

#[test]
fn parse_failure_exits_3_and_continues() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.go", BROKEN);
    let good = write(dir.path(), "good.go", NORMAL_IN);

    let output = run(&["--format", "json", "bad.go", "good.go"], dir.path());
    assert_eq!(output.status.code(), Some(3));
    let value = json(&output);
    assert_eq!(value["status"], "error");
    assert_eq!(value["files"][0]["outcome"], "failed");
    assert_eq!(value["files"][0]["reason"], "parse_failed");
    assert_eq!(value["files"][0]["line"], 5);
    assert_eq!(fs::read_to_string(&good).unwrap(), NORMAL_OUT);
}

#[test]
fn missing_path_exits_2() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--format", "json", "nope.go"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let value = json(&output);
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], 2);
    assert_eq!(value["error"]["kind"], "invalid_arguments");
}

#[test]
fn no_go_files_exits_2() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# tool\n");
    let output = run(&["."], dir.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no Go files found"), "{}", stderr);
}

#[test]
fn no_paths_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = run(&[], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(unix)]
#[test]
fn failing_checkout_exits_4_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.go", NORMAL_IN);

    let output = run(&["--format", "json", "--checkout", "false", "main.go"], dir.path());
    assert_eq!(output.status.code(), Some(4));
    let value = json(&output);
    assert_eq!(value["error"]["kind"], "checkout_failed");
    assert_eq!(fs::read_to_string(&main).unwrap(), NORMAL_IN);
}

#[cfg(unix)]
#[test]
fn checkout_runs_before_write() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.go", NORMAL_IN);

    // `test -w` fails unless the file exists and is writable.
    let output = run(&["--checkout", "test -w", "main.go"], dir.path());
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(fs::read_to_string(&main).unwrap(), NORMAL_OUT);
}
