//! End-to-end tests for the numeracy binary
//!
//! Every run gets its own config directories and working directory so the
//! developer's own configuration never leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn numeracy(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_numeracy"))
        .args(args)
        .current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("xdg"))
        .env("NUMERACY_PROJECT_CONFIG_DIR", workdir.join("project"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run numeracy")
}

fn bundled_rules_dir() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../rules")
        .display()
        .to_string()
}

#[test]
fn numeracy_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = numeracy(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("rules"));
}

#[test]
fn numeracy_config_show_works_without_config() {
    let dir = TempDir::new().unwrap();
    let output = numeracy(dir.path(), &["config", "show"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("port = 7450"));
    assert!(stdout.contains("[rules]"));
}

#[test]
fn numeracy_config_show_reads_project_config() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("project")).unwrap();
    std::fs::write(
        dir.path().join("project/config.toml"),
        "[server]\nport = 9123\n",
    )
    .unwrap();

    let output = numeracy(dir.path(), &["config", "show"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port = 9123"));
}

#[test]
fn numeracy_config_path_shows_paths() {
    let dir = TempDir::new().unwrap();
    let output = numeracy(dir.path(), &["config", "path"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("User config:"));
    assert!(stdout.contains("Project config:"));
}

#[test]
fn numeracy_rules_check_lists_bundled_task() {
    let dir = TempDir::new().unwrap();
    let rules = bundled_rules_dir();
    let output = numeracy(dir.path(), &["rules", "check", "--rules-dir", &rules]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("6x8: 1 probe(s)"));
}

#[test]
fn numeracy_serve_refuses_invalid_rules() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("broken-rules");
    std::fs::create_dir_all(&rules).unwrap();
    std::fs::write(rules.join("bad.yaml"), "task_id: [not, a, string]\n").unwrap();

    let output = numeracy(
        dir.path(),
        &[
            "serve",
            "--port",
            "0",
            "--rules-dir",
            rules.to_str().unwrap(),
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load rules"));
}
