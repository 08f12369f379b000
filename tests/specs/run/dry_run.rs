//! `ald run --dry-run` specs

use crate::prelude::*;

#[test]
fn dry_run_completes_and_writes_a_log() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml", "--dry-run"])
        .passes()
        .stdout_has("Total time:  00:00:00")
        .stdout_has("cycle 1/2  step 1/2  A, 0.1 s")
        .stdout_has("cycle 2/2  step 2/2  B, 0.1 s")
        .stdout_has("completed")
        .stdout_has("Run normal: 2/2 cycles");

    let logs = temp.logs();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_Quick.txt"), "{name}");

    let log = std::fs::read_to_string(&logs[0]).unwrap();
    assert!(log.starts_with("Recipe-----------------------\n\nrecipe|initgas|wait|fingas|waitf|N|Nsteps|valves|times\n"));
    assert!(log.contains("Quick||0||0|2|2|A,B|0.1,0.1\n"));
    assert!(log.contains("cycles_done      2/2\n"));
    assert!(log.contains("ending           normal\n"));
    assert_eq!(log.matches("cycles_done").count(), 1);
}

#[test]
fn dry_run_writes_diagnostics_beside_the_logs() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml", "--dry-run"])
        .passes();

    let trace = temp.read("Logs/ald.trace.log");
    assert!(trace.contains("run started"), "{trace}");
    assert!(trace.contains("run finished"), "{trace}");
}

#[test]
fn zero_cycle_recipe_runs_init_and_final_only() {
    let temp = Project::quick();
    temp.file(
        "idle.toml",
        "name = \"Idle\"\ncycles = 0\n\n[[steps]]\nactuators = [\"A\"]\nduration = 5.0\n",
    );
    temp.ald()
        .args(&["run", "idle.toml", "--dry-run"])
        .passes()
        .stdout_lacks("cycle 1/")
        .stdout_has("Run normal: 0/0 cycles");

    let log = std::fs::read_to_string(&temp.logs()[0]).unwrap();
    assert!(!log.contains("cycles_done"));
    assert!(log.contains("time_per_cycle   0:00:05\n"));
}

#[test]
fn json_progress_stream() {
    let temp = Project::quick();
    let out = temp
        .ald()
        .args(&["run", "quick.toml", "--dry-run", "--json"])
        .passes();

    let events: Vec<serde_json::Value> = out
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(events.first().unwrap()["event"], "estimate");
    let finished = events.last().unwrap();
    assert_eq!(finished["event"], "finished");
    assert_eq!(finished["report"]["ending"], "normal");
    assert_eq!(finished["report"]["cycles_completed"], 2);
    assert_eq!(finished["report"]["steps_run"], 4);

    let phases: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "progress")
        .filter_map(|e| e["phase"].as_str())
        .collect();
    assert_eq!(phases.first(), Some(&"initializing"));
    assert_eq!(phases.last(), Some(&"completed"));
    assert!(phases.contains(&"running"));
    assert!(phases.contains(&"finalizing"));
}

#[test]
fn recipe_can_be_imported_from_a_log() {
    let temp = Project::quick();
    temp.ald()
        .args(&["run", "quick.toml", "--dry-run"])
        .passes();
    let first = temp.logs().remove(0);

    temp.ald()
        .args(&["check", "--from-log", first.to_str().unwrap()])
        .passes()
        .stdout_has("Recipe:      Quick")
        .stdout_has("Cycles:      2 x 2 steps");
}
