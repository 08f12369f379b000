//! Help and usage specs

use crate::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("ald")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("logs"));
}

#[test]
fn run_help_documents_recipe_sources() {
    Command::cargo_bin("ald")
        .unwrap()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--preset"))
        .stdout(predicate::str::contains("--from-log"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn run_requires_a_recipe_source() {
    let temp = Project::empty();
    temp.ald().args(&["run", "--dry-run"]).exits(2);
}

#[test]
fn recipe_sources_are_exclusive() {
    let temp = Project::quick();
    temp.ald()
        .args(&["check", "quick.toml", "--preset", "ald"])
        .fails()
        .stderr_has("cannot be used with");
}
