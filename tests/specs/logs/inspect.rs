//! `ald logs` specs

use crate::prelude::*;

#[test]
fn list_without_logs() {
    let temp = Project::quick();
    temp.ald()
        .args(&["logs", "list"])
        .passes()
        .stdout_has("No logs in Logs");
}

#[test]
fn list_and_show_a_finished_run() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml", "--dry-run"])
        .passes();
    let name = temp.logs()[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    temp.ald()
        .args(&["logs", "list"])
        .passes()
        .stdout_has("Quick")
        .stdout_has("2/2")
        .stdout_has(&name);

    temp.ald()
        .args(&["logs", "show", &name])
        .passes()
        .stdout_has("Recipe:      Quick")
        .stdout_has("Cycles done: 2/2")
        .stdout_has("Ending:      normal");
}

#[test]
fn interrupted_run_is_reported() {
    let temp = Project::quick();
    temp.file(
        "Logs/2024-01-01-08:00:00_Quick.txt",
        "Recipe-----------------------\n\n\
         recipe|initgas|wait|fingas|waitf|N|Nsteps|valves|times\n\
         Quick||0||0|2|2|A,B|0.1,0.1\n\n\
         Log--------------------------\n\
         recipe           Quick\n\
         start            2024-01-01-08:00:00\n\
         cycles_done      1/2\n",
    );

    temp.ald()
        .args(&["logs", "show", "2024-01-01-08:00:00_Quick.txt"])
        .passes()
        .stdout_has("Cycles done: 1/2")
        .stdout_has("Ending:      interrupted");
}

#[test]
fn show_missing_log() {
    let temp = Project::quick();
    temp.ald()
        .args(&["logs", "show", "nope.txt"])
        .fails()
        .stderr_has("not found")
        .stderr_has("ald logs list");
}

#[test]
fn list_as_json() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml", "--dry-run"])
        .passes();

    let out = temp.ald().args(&["logs", "list", "--json"]).passes();
    let records: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(records[0]["recipe"], "Quick");
    assert_eq!(records[0]["ending"], "normal");
}
