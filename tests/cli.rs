use assert_cmd::prelude::*;
use std::process::Command;

fn archlens() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("archlens"));
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("VITE_GOOGLE_API_KEY");
    cmd
}

#[test]
fn help_lists_subcommands() {
    archlens()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("architect"))
        .stdout(predicates::str::contains("trends"));
}

#[test]
fn blank_prompt_is_refused_before_any_request() {
    archlens()
        .args(["architect", "   "])
        .assert()
        .failure()
        .stderr(predicates::str::contains("prompt must not be empty"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    archlens()
        .arg("--config")
        .arg(&missing)
        .arg("trends")
        .assert()
        .failure()
        .stderr(predicates::str::contains("loading config from"));
}

#[test]
fn completions_are_generated() {
    archlens()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("archlens"));
}
