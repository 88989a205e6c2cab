use std::fs;
use std::path::Path;

use assert_cmd::Command;
use indoc::indoc;
use predicates::prelude::*;
use tempfile::TempDir;

const VSCODE_SNIPPETS: &str = indoc! {r#"
    {
        "For Loop": {
            "prefix": "forloop",
            "body": ["for (;;) {", "  $0", "}"],
            "description": "A loop"
        },
        "Log": {
            "prefix": "log",
            "body": "console.log($1);"
        }
    }
"#};

fn csnippet(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csnippet").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("in.code-snippets"), VSCODE_SNIPPETS).unwrap();
    tmp
}

#[test]
fn test_help_output() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Code snippet converter"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_output() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_convert_to_sublime_writes_one_file_per_snippet() {
    let tmp = workspace();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "in.code-snippets",
            "-o",
            "out",
            "-t",
            "sublime",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Conversion Summary ==="))
        .stdout(predicate::str::contains("Source:     VS Code"))
        .stdout(predicate::str::contains("Snippets:   2 read"))
        .stdout(predicate::str::contains("-> Sublime: 2 documents"))
        .stdout(predicate::str::contains("Created:     2"));

    let for_loop = fs::read_to_string(tmp.path().join("out/For-Loop.sublime-snippet")).unwrap();
    assert!(for_loop.contains("<tabTrigger>forloop</tabTrigger>"));
    assert!(!for_loop.contains("#{NAME:"));
    assert!(tmp.path().join("out/Log.sublime-snippet").is_file());
}

#[test]
fn test_convert_to_multiple_targets() {
    let tmp = workspace();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-f",
            "vscode",
            "-i",
            "in.code-snippets",
            "-o",
            "out",
            "-t",
            "atom",
            "-t",
            "dreamweaver",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Atom: 1 document"))
        .stdout(predicate::str::contains("-> Dreamweaver: 2 documents"));

    let atom = fs::read_to_string(tmp.path().join("out/snippets.cson")).unwrap();
    assert!(atom.contains("'prefix': 'forloop'"));
    assert!(tmp.path().join("out/For-Loop.csn").is_file());
    assert!(tmp.path().join("out/Log.csn").is_file());
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp = workspace();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "in.code-snippets",
            "-o",
            "out",
            "-t",
            "atom",
            "--dry-run",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("[DRY RUN] Would create"));

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_existing_file_is_kept_without_overwrite() {
    let tmp = workspace();
    fs::create_dir_all(tmp.path().join("out")).unwrap();
    fs::write(tmp.path().join("out/snippets.cson"), "old").unwrap();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "in.code-snippets",
            "-o",
            "out",
            "-t",
            "atom",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:     1 (exists: 1)"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("out/snippets.cson")).unwrap(),
        "old"
    );
}

#[test]
fn test_overwrite_replaces_existing_file() {
    let tmp = workspace();
    fs::create_dir_all(tmp.path().join("out")).unwrap();
    fs::write(tmp.path().join("out/snippets.cson"), "old").unwrap();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "in.code-snippets",
            "-o",
            "out",
            "-t",
            "atom",
            "--overwrite",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwritten: 1"));

    let atom = fs::read_to_string(tmp.path().join("out/snippets.cson")).unwrap();
    assert!(atom.contains("'log'"));
}

#[test]
fn test_convert_directory_back_to_vscode() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("sublime");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Say-Hello.sublime-snippet"),
        indoc! {r"
            <snippet>
                <content><![CDATA[console.log('hello');]]></content>
                <tabTrigger>hello</tabTrigger>
                <description>Greets</description>
            </snippet>
        "},
    )
    .unwrap();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "sublime",
            "-o",
            "back.code-snippets",
            "-t",
            "vscode",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Source:     Sublime"));

    let vscode = fs::read_to_string(tmp.path().join("back.code-snippets")).unwrap();
    assert!(vscode.contains("\"Say-Hello\""));
    assert!(vscode.contains("\"prefix\": \"hello\""));
}

#[test]
fn test_convert_requires_input_when_non_interactive() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .args(["--no-config", "--non-interactive", "convert", "-t", "atom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No input given"));
}

#[test]
fn test_convert_requires_target_when_non_interactive() {
    let tmp = workspace();
    csnippet(tmp.path())
        .args(["--no-config", "--non-interactive", "convert", "-i", "in.code-snippets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No target given"));
}

#[test]
fn test_convert_unrecognised_input_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "just some notes").unwrap();

    csnippet(tmp.path())
        .args([
            "--no-config",
            "--non-interactive",
            "convert",
            "-i",
            "notes.txt",
            "-t",
            "atom",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snippets not valid"));
}

#[test]
fn test_convert_uses_config_targets() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("custom.toml"),
        indoc! {r#"
            targets = ["dreamweaver"]
            output = "from-config"
            non_interactive = true
        "#},
    )
    .unwrap();

    csnippet(tmp.path())
        .args(["--config", "custom.toml", "convert", "-i", "in.code-snippets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Dreamweaver: 2 documents"));

    assert!(tmp.path().join("from-config/Log.csn").is_file());
}

#[test]
fn test_detect_command() {
    let tmp = workspace();
    csnippet(tmp.path())
        .args(["--no-config", "detect", "in.code-snippets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VS Code      match"))
        .stdout(predicate::str::contains("Detected: VS Code (vscode)"));
}

#[test]
fn test_detect_unknown_format() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "just some notes").unwrap();

    csnippet(tmp.path())
        .args(["--no-config", "detect", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect snippet format"));
}

#[test]
fn test_config_command_shows_merged_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("custom.toml"),
        "source = \"sublime\"\ntargets = [\"atom\"]\n",
    )
    .unwrap();

    csnippet(tmp.path())
        .args(["--config", "custom.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active configuration:"))
        .stdout(predicate::str::contains("source = \"sublime\""));
}

#[test]
fn test_config_command_with_no_config() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .args(["--no-config", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored (--no-config)"));
}

#[test]
fn test_missing_config_file() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .args(["--config", "missing.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_config_log_level() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("custom.toml"), "log_level = \"chatty\"\n").unwrap();

    csnippet(tmp.path())
        .args(["--config", "custom.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log_level"));
}

#[test]
fn test_config_and_no_config_conflict() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .args(["--config", "a.toml", "--no-config", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_target() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .args(["convert", "-t", "emacs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'emacs'"));
}

#[test]
fn test_unknown_subcommand() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .arg("unknown")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_no_subcommand() {
    let tmp = TempDir::new().unwrap();
    csnippet(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
