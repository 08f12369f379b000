//! Operator-facing error specs

use crate::prelude::*;

#[test]
fn unknown_preset_lists_the_available_ones() {
    let temp = Project::empty();
    temp.ald()
        .args(&["check", "--preset", "cvd"])
        .fails()
        .stderr_has("Unknown preset 'cvd'")
        .stderr_has("ald, purge");
}

#[test]
fn missing_recipe_file_is_reported() {
    let temp = Project::empty();
    temp.ald()
        .args(&["check", "nowhere.toml"])
        .fails()
        .stderr_has("cannot read recipe");
}

#[test]
fn missing_explicit_config_is_reported() {
    let temp = Project::empty();
    temp.ald()
        .args(&["--config", "absent.toml", "check", "--preset", "ald"])
        .fails()
        .stderr_has("Cannot load configuration");
}

#[test]
fn duplicate_actuator_ids_are_rejected() {
    let temp = Project::empty();
    temp.file(
        "ald.toml",
        "[[actuator]]\nid = \"V1\"\n\n[[actuator]]\nid = \"V1\"\n",
    );
    temp.ald()
        .args(&["check", "--preset", "purge"])
        .fails()
        .stderr_has("Cannot load configuration");
}

#[test]
fn run_without_driver_commands_suggests_dry_run() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml"])
        .fails()
        .stderr_has("not fully configured")
        .stderr_has("--dry-run");
    assert!(temp.logs().is_empty());
}
